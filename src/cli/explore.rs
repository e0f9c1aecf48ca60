//! explore CLI command
//!
//! One-shot listing/selection, or an interactive `dialoguer` walk of the
//! methodology tree.

use crate::browser::{DirectoryBrowser, Listing, Selection};
use crate::context::EngineContext;
use crate::services::explore_service;
use crate::Result;
use colored::Colorize;

pub fn run(
    ctx: &mut EngineContext,
    selection: Option<usize>,
    page: Option<usize>,
    path: Option<&str>,
    interactive: bool,
) -> Result<()> {
    let browser = ctx.browser_mut();

    if let Some(path) = path {
        browser.reset_to_root();
        browser.enter(path)?;
    }

    if interactive {
        return run_interactive(browser);
    }

    let text = explore_service::explore(browser, selection, page)?;
    println!("{}", text);
    Ok(())
}

/// Print the methodology's master prompt
pub fn master_prompt(ctx: &EngineContext) -> Result<()> {
    let content = ctx.read_master_prompt()?;
    println!(
        "{}",
        format!("📜 {}", ctx.master_prompt_path().display()).bright_black()
    );
    println!();
    println!("{}", content);
    Ok(())
}

/// Menu choice for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Up,
    Open(usize),
    PrevPage,
    NextPage,
    Quit,
}

fn menu(listing: &Listing) -> (Vec<String>, Vec<Choice>) {
    let mut labels = Vec::new();
    let mut choices = Vec::new();

    if !listing.at_root {
        labels.push("⬆  ..".to_string());
        choices.push(Choice::Up);
    }
    for (number, entry) in listing.numbered() {
        let icon = if entry.is_dir { "📁" } else { "📄" };
        labels.push(format!("{}. {} {}", number, icon, entry.name));
        choices.push(Choice::Open(number));
    }
    if listing.page > 1 {
        labels.push("◀  Previous page".to_string());
        choices.push(Choice::PrevPage);
    }
    if listing.page < listing.total_pages {
        labels.push("▶  Next page".to_string());
        choices.push(Choice::NextPage);
    }
    labels.push("✖  Quit".to_string());
    choices.push(Choice::Quit);

    (labels, choices)
}

fn run_interactive(browser: &mut DirectoryBrowser) -> Result<()> {
    let mut page = 1;

    loop {
        let listing = browser.show(Some(page))?;
        let header = if listing.total_pages > 1 {
            format!("📂 {} (page {}/{})", listing.path, listing.page, listing.total_pages)
        } else {
            format!("📂 {}", listing.path)
        };
        println!("{}", header.cyan().bold());

        let (labels, choices) = menu(&listing);
        let picked = dialoguer::Select::new()
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(idx) = picked else {
            return Ok(());
        };

        match choices[idx] {
            Choice::Quit => return Ok(()),
            Choice::Up => {
                browser.go_up();
                page = 1;
            }
            Choice::PrevPage => page -= 1,
            Choice::NextPage => page += 1,
            Choice::Open(number) => match browser.select(number)? {
                Selection::Directory(_) => page = 1,
                Selection::File(file) => {
                    println!("{}", explore_service::render_file(&file));
                }
            },
        }
    }
}
