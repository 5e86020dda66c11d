use scraper::{ElementRef, Html, Selector};

use nephrag_core::SourceKind;

// Elements whose entire subtree is boilerplate on documentation pages.
const STRIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "form", "iframe",
];

// Substring patterns applied to class and id attributes.
const STRIP_PATTERNS: &[&str] = &["nav", "sidebar", "ads", "comments", "breadcrumb"];

// Tried in order; the first selector with a match wins.
const SHARED_CONTENT_SELECTORS: &[&str] = &["main", "article", ".content", "[role=\"main\"]"];

// docs.nephio.org runs the Docsy theme.
const NEPHIO_CONTENT_SELECTORS: &[&str] = &[".td-content", ".markdown-body"];

// docs.o-ran-sc.org is Sphinx with the Read the Docs theme.
const ORAN_SC_CONTENT_SELECTORS: &[&str] = &[".rst-content", ".document"];

const NAV_PHRASES: &[&str] = &[
    "home",
    "back",
    "next",
    "previous",
    "menu",
    "login",
    "sign in",
    "sign up",
    "search",
    "twitter",
    "facebook",
    "linkedin",
    "github",
    "youtube",
    "edit this page",
    "table of contents",
    "skip to content",
    "print",
];

const MIN_LINE_CHARS: usize = 3;
const NAV_PHRASE_MAX_CHARS: usize = 40;

/// Strips boilerplate markup from a documentation page and returns the
/// main body text. Pure; a navigation-only page cleans to an empty
/// string, which callers must treat as "no usable content" rather than
/// an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentCleaner;

impl ContentCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, html: &str, kind: SourceKind) -> String {
        let document = Html::parse_document(html);

        let mut raw = String::new();
        match self.main_content(&document, kind) {
            Some(container) => collect_text(container, &mut raw),
            None => collect_text(document.root_element(), &mut raw),
        }

        tidy_lines(&raw)
    }

    fn main_content<'a>(&self, document: &'a Html, kind: SourceKind) -> Option<ElementRef<'a>> {
        let kind_selectors = match kind {
            SourceKind::Nephio => NEPHIO_CONTENT_SELECTORS,
            SourceKind::OranSc => ORAN_SC_CONTENT_SELECTORS,
        };

        for raw_selector in kind_selectors
            .iter()
            .chain(SHARED_CONTENT_SELECTORS)
            .chain(std::iter::once(&"body"))
        {
            let Ok(selector) = Selector::parse(raw_selector) else {
                continue;
            };
            if let Some(element) = document.select(&selector).next() {
                return Some(element);
            }
        }

        None
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if is_stripped(&element) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push('\n');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}

fn is_stripped(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if STRIP_TAGS.contains(&value.name()) {
        return true;
    }

    let class_attr = value.attr("class").unwrap_or("").to_ascii_lowercase();
    let id_attr = value.attr("id").unwrap_or("").to_ascii_lowercase();
    STRIP_PATTERNS
        .iter()
        .any(|pattern| class_attr.contains(pattern) || id_attr.contains(pattern))
}

fn tidy_lines(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            continue;
        }
        if line.chars().count() <= NAV_PHRASE_MAX_CHARS {
            let lowered = line.to_lowercase();
            if NAV_PHRASES.contains(&lowered.as_str()) {
                continue;
            }
        }
        if lines.last() == Some(&line) {
            continue;
        }
        lines.push(line);
    }

    lines.join("\n")
}
