//! Interactive overlay session.
//!
//! Mirrors the map's control panel: a bounding box form, a keyword form,
//! and a reset for each. Both overlays persist between actions.

use dialoguer::{Input, Select};
use redline_map_overlay::OverlaySession;
use redline_map_overlay_models::BoundingBox;

use crate::report;

enum Action {
    FilterByBox,
    SearchByKeyword,
    ResetBox,
    ClearSearch,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::FilterByBox,
        Self::SearchByKeyword,
        Self::ResetBox,
        Self::ClearSearch,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::FilterByBox => "Bound by coordinates",
            Self::SearchByKeyword => "Search by keyword",
            Self::ResetBox => "Reset bounding box",
            Self::ClearSearch => "Clear search",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive loop until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal prompts fail.
pub async fn run(session: &mut OverlaySession) -> Result<(), Box<dyn std::error::Error>> {
    println!("Redlining Map ({} source)", session.source().id());
    println!();
    report::print_overlay("Bound overlay", session.bound_overlay());

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::FilterByBox => {
                let bbox = BoundingBox::new(
                    prompt("Minimum latitude")?,
                    prompt("Maximum latitude")?,
                    prompt("Minimum longitude")?,
                    prompt("Maximum longitude")?,
                );
                match session.submit_box(&bbox).await {
                    Ok(Some(_)) => report::print_overlay("Bound overlay", session.bound_overlay()),
                    Ok(None) => println!("All four coordinates are required."),
                    Err(e) => {
                        log::error!("Bounding box query failed: {e}");
                        println!("Query failed; keeping the previous overlay.");
                    }
                }
            }
            Action::SearchByKeyword => {
                let keyword = prompt("Keyword")?;
                match session.submit_keyword(&keyword).await {
                    Ok(Some(_)) => {
                        report::print_overlay("Search overlay", session.search_overlay());
                    }
                    Ok(None) => println!("Enter a keyword to search for."),
                    Err(e) => {
                        log::error!("Keyword query failed: {e}");
                        println!("Query failed; keeping the previous highlights.");
                    }
                }
            }
            Action::ResetBox => {
                let count = session.reset_box();
                println!("Bound overlay reset to the full dataset ({count} features).");
            }
            Action::ClearSearch => {
                session.reset_keyword();
                println!("Search highlights cleared.");
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn prompt(label: &str) -> Result<String, dialoguer::Error> {
    Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
}
