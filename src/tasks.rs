//! Canned task builder: keyword classification over free-text queries and
//! the stock artifacts each class produces.
//!
//! Everything here is deliberately dumb string matching. Queries that need
//! actual generation go through the model pipeline instead (`POST /task`).

use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;

use crate::storage::{self, Workspace};

/// What a free-text query asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Lcm,
    Weather,
    Calculator,
    Chatbot,
    Generic,
}

/// Keyword classification, first match wins.
pub fn classify(query: &str) -> TaskKind {
    let q = query.to_lowercase();
    if q.contains("least") && q.contains("common") && q.contains("multiple") {
        TaskKind::Lcm
    } else if q.contains("weather") {
        TaskKind::Weather
    } else if q.contains("calculator") {
        TaskKind::Calculator
    } else if q.contains("chat") || q.contains("gpt") || q.contains("ai") {
        TaskKind::Chatbot
    } else {
        TaskKind::Generic
    }
}

/// Result of running one canned task.
#[derive(Debug)]
pub struct TaskOutcome {
    pub output: String,
    pub files_created: Vec<String>,
}

/// Run the canned task for `query`, writing artifacts into a fresh
/// directory under `workspace` when the task produces any.
pub fn run_canned_task(query: &str, workspace: &Workspace) -> Result<TaskOutcome> {
    match classify(query) {
        TaskKind::Lcm => Ok(TaskOutcome {
            output: lcm_answer(query),
            files_created: Vec::new(),
        }),
        TaskKind::Weather => write_artifact(
            workspace,
            "weather_app.py",
            WEATHER_APP,
            "✅ Weather app code generated successfully.".to_string(),
        ),
        TaskKind::Calculator => write_artifact(
            workspace,
            "calculator_app.py",
            CALCULATOR_APP,
            "✅ Calculator app generated successfully.".to_string(),
        ),
        TaskKind::Chatbot => write_artifact(
            workspace,
            "chatbot_app.py",
            CHATBOT_APP,
            "✅ ChatGPT-style chatbot code generated successfully.".to_string(),
        ),
        TaskKind::Generic => write_artifact(
            workspace,
            "generic_task.py",
            &format!("# Placeholder for custom task: {query}\nprint('Task processed: {query}')\n"),
            format!("✅ Generic code file created for task: {query}"),
        ),
    }
}

fn write_artifact(
    workspace: &Workspace,
    filename: &str,
    content: &str,
    output: String,
) -> Result<TaskOutcome> {
    let dir = workspace.create_app_dir()?;
    let path = storage::write_app_file(&dir, filename, content)?;
    Ok(TaskOutcome {
        output,
        files_created: vec![path.display().to_string()],
    })
}

/// Answer a "least common multiple" question from the first two integer
/// tokens in the query. A token too large for u64 is an extraction error,
/// never silently replaced by a later token.
fn lcm_answer(query: &str) -> String {
    let tokens: Vec<&str> = digit_regex()
        .find_iter(query)
        .map(|m| m.as_str())
        .take(2)
        .collect();
    if tokens.len() < 2 {
        return "Error: Could not extract numbers.".to_string();
    }
    let (Ok(a), Ok(b)) = (tokens[0].parse::<u64>(), tokens[1].parse::<u64>()) else {
        return "Error: Could not extract numbers.".to_string();
    };
    let g = gcd(a, b);
    if g == 0 {
        // both inputs were zero
        return "0".to_string();
    }
    (u128::from(a / g) * u128::from(b)).to_string()
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

const WEATHER_APP: &str = r#"import requests

def get_weather(city):
    api_key = "YOUR_API_KEY"
    url = f"https://api.openweathermap.org/data/2.5/weather?q={city}&appid={api_key}&units=metric"
    res = requests.get(url).json()
    print(f"{city}: {res['main']['temp']}°C, {res['weather'][0]['description']}")

if __name__ == "__main__":
    city = input("Enter city name: ")
    get_weather(city)
"#;

const CALCULATOR_APP: &str = r#"def calculator():
    print("Simple Calculator")
    a = float(input("Enter first number: "))
    op = input("Enter operator (+, -, *, /): ")
    b = float(input("Enter second number: "))
    if op == '+': print(a + b)
    elif op == '-': print(a - b)
    elif op == '*': print(a * b)
    elif op == '/': print(a / b)
    else: print("Invalid operator")

if __name__ == "__main__":
    calculator()
"#;

const CHATBOT_APP: &str = r#"from openai import OpenAI

def chat():
    client = OpenAI(api_key="YOUR_API_KEY")
    print("ChatGPT-like bot. Type 'exit' to quit.")
    while True:
        user = input("You: ")
        if user.lower() == "exit": break
        res = client.chat.completions.create(model="gpt-4o-mini",
                                             messages=[{"role": "user", "content": user}])
        print("AI:", res.choices[0].message.content)

if __name__ == "__main__":
    chat()
"#;
