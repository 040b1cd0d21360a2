mod cli;
mod config;
mod country;
mod display;
mod error;
mod http;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use dialoguer::{Input, Select};

use cli::{Cli, Command};
use config::Target;
use country::CountryApi;
use country::model::CountryInfo;
use error::ApiError;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let output = if cli.json { Output::Json } else { Output::Card };

    match cli.command {
        None => cmd_interactive(output).await?,
        Some(Command::Search { name }) => {
            return cmd_search(&Command::search_name(&name), output).await;
        }
        Some(Command::Random) => cmd_random(output).await?,
        Some(Command::Endpoint) => cmd_endpoint(),
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Card,
    Json,
}

impl Output {
    fn render(self, info: &CountryInfo) -> Result<String> {
        match self {
            Output::Card => Ok(display::render_card(info, Utc::now()).join("\n")),
            Output::Json => Ok(serde_json::to_string_pretty(info)?),
        }
    }

    fn print(self, info: &CountryInfo) -> Result<()> {
        println!("{}", self.render(info)?);
        Ok(())
    }
}

async fn cmd_search(name: &str, output: Output) -> Result<ExitCode> {
    match CountryApi::shared().search(name).await? {
        Some(info) => {
            output.print(&info)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no country named '{}'", name.trim());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_random(output: Output) -> Result<()> {
    let info = CountryApi::shared().random().await?;
    output.print(&info)
}

fn cmd_endpoint() {
    let handle = http::client();
    println!("target     {}", Target::selected());
    println!("base url   {}", handle.base_url());
    println!("logging    {}", handle.log_level());
}

const MENU: [&str; 3] = ["Search by name", "Random country", "Quit"];

async fn cmd_interactive(output: Output) -> Result<()> {
    let api = CountryApi::shared();

    loop {
        let choice = Select::new()
            .with_prompt("Country Info")
            .items(&MENU)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => {
                let name: String = Input::new().with_prompt("Country name").interact_text()?;
                match api.search(&name).await {
                    Ok(Some(info)) => output.print(&info)?,
                    Ok(None) => println!("no country named '{}'", name.trim()),
                    Err(ApiError::EmptyQuery) => println!("enter a country name"),
                    Err(err) => eprintln!("{}", err),
                }
            }
            Some(1) => match api.random().await {
                Ok(info) => output.print(&info)?,
                Err(err) => eprintln!("{}", err),
            },
            _ => break,
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::model::{Currency, Population};

    fn kenya() -> CountryInfo {
        CountryInfo {
            country: "Kenya".to_string(),
            country_code: "KE".to_string(),
            continent: "Africa".to_string(),
            capital: "Nairobi".to_string(),
            population: Population::Count(53_771_300),
            timezones: vec!["UTC+03:00".to_string()],
            currency: Currency {
                code: "KES".to_string(),
                name: "Kenyan shilling".to_string(),
                symbol: "Sh".to_string(),
            },
            flag_url: "https://flagcdn.com/w320/ke.png".to_string(),
        }
    }

    #[test]
    fn json_output_round_trips_record() {
        let rendered = Output::Json.render(&kenya()).unwrap();
        let decoded: CountryInfo = serde_json::from_str(&rendered).unwrap();
        assert_eq!(decoded, kenya());
    }

    #[test]
    fn card_output_is_multiline() {
        let rendered = Output::Card.render(&kenya()).unwrap();
        assert!(rendered.lines().count() >= 7);
        assert!(rendered.contains("Nairobi"));
        assert!(rendered.contains("53,771,300"));
    }
}
