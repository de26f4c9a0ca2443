use scraper::{ElementRef, Html, Selector};

/// Parsed page exposing only pattern selection and trimmed text.
pub struct PageDoc {
    html: Html,
}

impl PageDoc {
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// All elements matching `selector` in document order. An unparsable selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(selector) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    /// Trimmed text of the first element matching `selector`, if any.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let sel = parse_selector(selector)?;
        self.html.select(&sel).next().map(|el| trimmed_text(&el))
    }
}

/// Elements below `el` matching `selector`.
pub fn select_within<'a>(el: &ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match parse_selector(selector) {
        Some(sel) => el.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Concatenated descendant text with surrounding whitespace removed.
pub fn trimmed_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            log::warn!("ignoring invalid selector `{selector}`: {e}");
            None
        }
    }
}
