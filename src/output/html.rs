//! Standalone HTML report.
//!
//! The report is a sequence of blocks (headings, preformatted text,
//! paragraphs, figures) wrapped in a fixed header and footer. Text is
//! escaped; figures reference image files written next to the report.

use std::path::Path;

use super::svg::escape;

const CSS: &str = r#"
        body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f7f7f7; color: #222; }
        .container { max-width: 900px; margin: 0 auto; background: white; padding: 2rem 3rem; }
        h1 { border-bottom: 2px solid #4c72b0; padding-bottom: 0.4rem; }
        h2 { margin-top: 2rem; color: #4c72b0; }
        pre { background: #f2f2f2; padding: 0.8rem 1rem; overflow-x: auto; }
        figure { margin: 1rem 0; }
        figure img { max-width: 100%; }
        .footer { margin-top: 3rem; font-size: 0.85rem; color: #777; }
"#;

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Heading(String),
    Preformatted(String),
    Paragraph(String),
    Figure { src: String, alt: String },
}

/// An HTML document built block by block.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlReport {
    title: String,
    id: String,
    blocks: Vec<Block>,
}

impl HtmlReport {
    /// Start a report with a page title and a header anchor id.
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            blocks: Vec::new(),
        }
    }

    /// Section heading.
    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    /// Monospaced block, for tables of statistics.
    pub fn preformatted(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Preformatted(text.into()));
        self
    }

    /// Paragraph of prose.
    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    /// Embedded image by relative path.
    pub fn figure(&mut self, src: impl Into<String>, alt: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Figure {
            src: src.into(),
            alt: alt.into(),
        });
        self
    }

    /// Render the whole document.
    pub fn render(&self) -> String {
        let mut html = String::new();

        html.push_str(&self.render_head());
        html.push_str("<body>\n<div class=\"container\">\n");
        html.push_str(&format!(
            "<h1 id=\"{}\">{}</h1>\n",
            escape(&self.id),
            escape(&self.title)
        ));

        for block in &self.blocks {
            html.push_str(&render_block(block));
        }

        html.push_str(&render_footer());
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Render and write to `path`.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.render())?;
        tracing::info!("Wrote report {}", path.display());
        Ok(())
    }

    fn render_head(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
{CSS}
    </style>
</head>
"#,
            escape(&self.title)
        )
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading(text) => format!("<h2>{}</h2>\n", escape(text)),
        Block::Preformatted(text) => format!("<pre>{}</pre>\n", escape(text.trim_end())),
        Block::Paragraph(text) => format!("<p>{}</p>\n", escape(text)),
        Block::Figure { src, alt } => format!(
            "<figure><img src=\"{}\" alt=\"{}\"></figure>\n",
            escape(src),
            escape(alt)
        ),
    }
}

fn render_footer() -> String {
    format!(
        "<div class=\"footer\">Generated by galton-bootstrap {}</div>\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_structure() {
        let mut report = HtmlReport::new("Galton height analysis", "galton");
        report
            .heading("Analysis of entire data file")
            .preformatted("count  934\n")
            .figure("galton_male_height.svg", "Male heights");

        let html = report.render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Galton height analysis</title>"));
        assert!(html.contains("<h1 id=\"galton\">"));
        assert!(html.contains("<h2>Analysis of entire data file</h2>"));
        assert!(html.contains("<pre>count  934</pre>"));
        assert!(html.contains("<img src=\"galton_male_height.svg\""));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_escapes_text() {
        let mut report = HtmlReport::new("a & b", "x");
        report.paragraph("<script>alert(1)</script>");
        let html = report.render();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<title>a &amp; b</title>"));
    }

    #[test]
    fn test_blocks_keep_order() {
        let mut report = HtmlReport::new("t", "t");
        report.heading("first").heading("second");
        let html = report.render();
        assert!(html.find("first").unwrap() < html.find("second").unwrap());
    }
}
