// Relay client CLI - compose a studio brief and print the model's answer.
// Use: relay-client studio --topic "Rainy season promo" --tone playful

use anyhow::Result;
use prompt_relay::briefs::{IdeasBrief, LightingBrief, PlannerBrief, ProjectBrief, StudioBrief};
use prompt_relay::{parse_model_json, RelayClient, ResponseContract};
use std::env;

const DEFAULT_RELAY_URL: &str = "http://localhost:3000";

fn usage() {
    eprintln!("Relay Client CLI");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  relay-client studio --topic <text> [--persona p] [--tone t] [--length l] [--format f]...");
    eprintln!("  relay-client lighting --goal <text>");
    eprintln!("  relay-client planner --goal <text> [--posts n]");
    eprintln!("  relay-client project --name <text> --brief <text>");
    eprintln!("  relay-client ideas --topic <text>");
    eprintln!("  relay-client prompt <raw prompt text>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --url <base>   Relay base URL (default {} or RELAY_URL)", DEFAULT_RELAY_URL);
    eprintln!("  --legacy       Tolerate legacy response key names");
    eprintln!("  --json         Parse the answer as model JSON and pretty-print it");
}

struct Flags {
    values: Vec<(String, String)>,
    positional: Vec<String>,
    legacy: bool,
    json: bool,
}

fn parse_flags(args: Vec<String>) -> Result<Flags> {
    let mut flags = Flags {
        values: Vec::new(),
        positional: Vec::new(),
        legacy: false,
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--legacy" => {
                flags.legacy = true;
                i += 1;
            }
            "--json" => {
                flags.json = true;
                i += 1;
            }
            name if name.starts_with("--") => {
                if i + 1 >= args.len() {
                    anyhow::bail!("{} requires a value", name);
                }
                flags
                    .values
                    .push((name.trim_start_matches("--").to_string(), args[i + 1].clone()));
                i += 2;
            }
            _ => {
                flags.positional.push(args[i].clone());
                i += 1;
            }
        }
    }

    Ok(flags)
}

impl Flags {
    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn get_all(&self, name: &str) -> Vec<String> {
        self.values
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn require(&self, name: &str) -> Result<String> {
        self.get(name)
            .map(|v| v.to_string())
            .ok_or_else(|| anyhow::anyhow!("--{} is required", name))
    }
}

fn build_prompt(mode: &str, flags: &Flags) -> Result<String> {
    match mode {
        "studio" => {
            let mut brief = StudioBrief::new(flags.require("topic")?);
            if let Some(persona) = flags.get("persona") {
                brief.persona = persona.to_string();
            }
            if let Some(tone) = flags.get("tone") {
                brief.tone = tone.to_string();
            }
            if let Some(length) = flags.get("length") {
                brief.length = length.to_string();
            }
            let formats = flags.get_all("format");
            if !formats.is_empty() {
                brief.formats = formats;
            }
            Ok(brief.prompt())
        }
        "lighting" => Ok(LightingBrief { goal: flags.require("goal")? }.prompt()),
        "planner" => {
            let posts = match flags.get("posts") {
                Some(raw) => raw.parse()?,
                None => 7,
            };
            Ok(PlannerBrief { goal: flags.require("goal")?, posts }.prompt())
        }
        "project" => Ok(ProjectBrief {
            name: flags.require("name")?,
            brief: flags.require("brief")?,
        }
        .prompt()),
        "ideas" => Ok(IdeasBrief { topic: flags.require("topic")? }.prompt()),
        "prompt" => {
            if flags.positional.is_empty() {
                anyhow::bail!("prompt mode needs the prompt text as an argument");
            }
            Ok(flags.positional.join(" "))
        }
        other => anyhow::bail!(
            "Unknown mode: {}. Modes: studio, lighting, planner, project, ideas, prompt",
            other
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        usage();
        return Ok(());
    }

    let mode = args.remove(0);
    let flags = parse_flags(args)?;
    let prompt = build_prompt(&mode, &flags)?;

    let base_url = flags
        .get("url")
        .map(|u| u.to_string())
        .or_else(|| env::var("RELAY_URL").ok())
        .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

    let mut client = RelayClient::new(base_url);
    if flags.legacy {
        client = client.with_contract(ResponseContract::Legacy);
    }

    match client.generate(&prompt).await {
        Ok(text) => {
            if flags.json {
                let parsed = parse_model_json(&text);
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                println!("{}", text.trim());
            }
            Ok(())
        }
        Err(e) => {
            // Relay-reported failures arrive as display-ready messages.
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
