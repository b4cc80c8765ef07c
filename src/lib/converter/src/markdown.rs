use lazy_static::lazy_static;
use regex::{Captures, Regex};
use utils::escape_html;

use crate::{Conversion, ConversionError, ConversionOptions};

const FENCE: &str = "```";

lazy_static! {
    static ref UNORDERED_ITEM: Regex = Regex::new(r"^\s*[*-] (.*)$").expect("valid list regex");
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\s*\d+\. (.*)$").expect("valid list regex");
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").expect("valid code regex");
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex");
    static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").expect("valid italic regex");
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(&self) -> &'static str {
        match *self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Only web and mail links are rendered as is, anything else with a scheme (e.g. `javascript:`) is
/// replaced with `#`. Relative links are kept.
fn is_safe_href(href: &str) -> bool {
    match href.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            matches!(scheme.to_lowercase().as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

/// Marks where a rendered link is put back once emphasis has been applied.
const LINK_OPEN: char = '\u{E000}';
const LINK_CLOSE: char = '\u{E001}';

fn render_bold_italic(escaped: &str) -> String {
    let bolded = BOLD.replace_all(escaped, "<strong>${1}</strong>");
    ITALIC.replace_all(&bolded, "<em>${1}</em>").into_owned()
}

/// Bold, italics and links. The text is escaped before any markup is added. Links are set aside
/// first so that emphasis never reaches into an href.
fn render_emphasis(text: &str) -> String {
    let text: String = text
        .chars()
        .filter(|c| *c != LINK_OPEN && *c != LINK_CLOSE)
        .collect();

    let mut links = Vec::new();
    let marked = LINK.replace_all(&text, |caps: &Captures| {
        let href = if is_safe_href(&caps[2]) {
            escape_html(&caps[2])
        } else {
            String::from("#")
        };
        links.push(format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            href,
            render_bold_italic(&escape_html(&caps[1]))
        ));
        format!("{}{}{}", LINK_OPEN, links.len() - 1, LINK_CLOSE)
    });

    let rendered = render_bold_italic(&escape_html(&marked));
    if links.is_empty() {
        return rendered;
    }

    let mut res = String::with_capacity(rendered.len());
    let mut rest = rendered.as_str();
    while let Some(open) = rest.find(LINK_OPEN) {
        res.push_str(&rest[..open]);
        let after = &rest[open + LINK_OPEN.len_utf8()..];
        let close = match after.find(LINK_CLOSE) {
            Some(c) => c,
            None => {
                rest = after;
                continue;
            }
        };
        if let Some(link) = after[..close].parse::<usize>().ok().and_then(|i| links.get(i)) {
            res.push_str(link);
        }
        rest = &after[close + LINK_CLOSE.len_utf8()..];
    }
    res.push_str(rest);

    res
}

/// Render a single line of inline markdown. Code spans are left untouched apart from escaping.
fn render_inline(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    let mut last = 0;

    for code in INLINE_CODE.find_iter(text) {
        res.push_str(&render_emphasis(&text[last..code.start()]));
        let inner = &code.as_str()[1..code.as_str().len() - 1];
        res.push_str("<code>");
        res.push_str(&escape_html(inner));
        res.push_str("</code>");
        last = code.end();
    }
    res.push_str(&render_emphasis(&text[last..]));

    res
}

struct HtmlWriter {
    lines: Vec<String>,
    list: Option<ListKind>,
}

impl HtmlWriter {
    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.lines.push(format!("</{}>", kind.tag()));
        }
    }

    fn list_item(&mut self, kind: ListKind, content: &str) {
        if self.list != Some(kind) {
            self.close_list();
            self.lines.push(format!("<{}>", kind.tag()));
            self.list = Some(kind);
        }
        self.lines.push(format!("<li>{}</li>", render_inline(content)));
    }

    fn block(&mut self, tag: &str, content: &str) {
        self.close_list();
        self.lines
            .push(format!("<{tag}>{}</{tag}>", render_inline(content), tag = tag));
    }

    fn code_block(&mut self, code: &[&str]) {
        self.close_list();
        self.lines
            .push(format!("<pre><code>{}</code></pre>", escape_html(&code.join("\n"))));
    }
}

/// Render a small, safe subset of markdown to html: fenced code, inline code, three levels of
/// headings, bold, italics, links, unordered and ordered lists, blockquotes and paragraphs.
/// Every block is placed on its own line.
pub fn render_markdown(input: &str) -> String {
    let mut writer = HtmlWriter {
        lines: Vec::new(),
        list: None,
    };
    let mut code: Option<Vec<&str>> = None;

    for line in input.lines() {
        let trimmed = line.trim();

        if let Some(mut block) = code.take() {
            if trimmed.starts_with(FENCE) {
                writer.code_block(&block);
            } else {
                block.push(line);
                code = Some(block);
            }
            continue;
        }

        if let Some(fenced) = trimmed.strip_prefix(FENCE) {
            match fenced.strip_suffix(FENCE) {
                Some(single) if !single.is_empty() => writer.code_block(&[single]),
                _ => code = Some(Vec::new()),
            }
            continue;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            writer.list_item(ListKind::Unordered, &caps[1]);
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            writer.list_item(ListKind::Ordered, &caps[1]);
        } else if let Some(h) = line.strip_prefix("### ") {
            writer.block("h3", h);
        } else if let Some(h) = line.strip_prefix("## ") {
            writer.block("h2", h);
        } else if let Some(h) = line.strip_prefix("# ") {
            writer.block("h1", h);
        } else if let Some(q) = line.strip_prefix("> ") {
            writer.block("blockquote", q);
        } else if trimmed.is_empty() {
            writer.close_list();
        } else {
            writer.block("p", line);
        }
    }

    // An unterminated fence runs to the end of the document.
    if let Some(block) = code {
        writer.code_block(&block);
    }
    writer.close_list();

    writer.lines.join("\n")
}

pub struct MarkdownToHtml;

impl Conversion for MarkdownToHtml {
    fn name(&self) -> &str {
        "markdown to html"
    }

    fn from(&self) -> &str {
        "markdown"
    }

    fn to(&self) -> &str {
        "html"
    }

    fn convert(&self, input: &str, _: &ConversionOptions) -> Result<String, ConversionError> {
        Ok(render_markdown(input))
    }
}
