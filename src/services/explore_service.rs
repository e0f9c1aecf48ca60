//! Explore service - numbered navigation text over the methodology tree

use crate::browser::{DirectoryBrowser, FileView, Listing, Selection};
use crate::error::EngineResult;

/// `selection` wins over `page`; with neither, the first page is shown
pub fn explore(
    browser: &mut DirectoryBrowser,
    selection: Option<usize>,
    page: Option<usize>,
) -> EngineResult<String> {
    match selection {
        Some(n) => match browser.select(n)? {
            Selection::Directory(listing) => Ok(render_listing(&listing)),
            Selection::File(file) => Ok(render_file(&file)),
        },
        None => browser.show(page).map(|listing| render_listing(&listing)),
    }
}

pub fn render_listing(listing: &Listing) -> String {
    if listing.is_empty() {
        return format!("📂 {}: Empty directory", listing.path);
    }

    let mut result = String::from("📂 **3-Pass Methodology Explorer**\n");
    result.push_str(&format!("**Current Path**: {}\n\n", listing.path));

    if listing.total_pages == 1 {
        result.push_str(&format!("**Contents** ({} items):\n", listing.total_items));
    } else {
        result.push_str(&format!(
            "**Contents** (page {}/{}, {} total):\n",
            listing.page, listing.total_pages, listing.total_items
        ));
    }

    for (number, entry) in listing.numbered() {
        let icon = if entry.is_dir { "📁" } else { "📄" };
        result.push_str(&format!("{}. {} {}\n", number, icon, entry.name));
    }

    result.push_str("\n**Navigation**:\n");
    result.push_str("• Select by number: `explore_methodology(3)` to select item 3\n");
    if listing.page < listing.total_pages {
        result.push_str(&format!(
            "• Next page: `explore_methodology(page={})`\n",
            listing.page + 1
        ));
    }
    if listing.page > 1 {
        result.push_str(&format!(
            "• Previous page: `explore_methodology(page={})`\n",
            listing.page - 1
        ));
    }
    if !listing.at_root {
        result.push_str("• Go up: `explore_methodology(0)` to go up one directory\n");
    }

    result
}

pub fn render_file(file: &FileView) -> String {
    format!(
        r#"📄 **File**: {path}
**Size**: {size} bytes

---

{content}

---

**Navigation**:
• Back to directory: `explore_methodology()` to see current directory
• Go up: `explore_methodology(0)` to go up one directory
"#,
        path = file.path,
        size = file.size,
        content = file.content,
    )
}
