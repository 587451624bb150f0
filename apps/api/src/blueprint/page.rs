//! The operator page: job title input, generate trigger, output area and a
//! download link shown only while a valid blueprint is available.

use crate::blueprint::render::{escape_html_attr, escape_html_text};
use crate::errors::AppError;

/// What the output area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Empty,
    /// Plain operator notice, e.g. "Please enter a job title."
    Message(String),
    /// Already-rendered blueprint table markup.
    Table(String),
    Error {
        context: &'static str,
        message: String,
        raw_response: Option<String>,
    },
}

impl Output {
    /// Maps an error into the output area. Operator notices render as plain
    /// messages; everything else is prefixed with `context`.
    pub fn from_error(context: &'static str, err: &AppError) -> Self {
        if err.is_operator_notice() {
            return Output::Message(err.to_string());
        }
        Output::Error {
            context,
            message: err.to_string(),
            raw_response: err.raw_response().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub job_title: String,
    /// Confirmation line shown above the output (feedback acknowledgements).
    pub notice: Option<String>,
    pub output: Output,
    pub download_available: bool,
}

impl PageView {
    pub fn empty() -> Self {
        Self {
            job_title: String::new(),
            notice: None,
            output: Output::Empty,
            download_available: false,
        }
    }
}

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; }
table.blueprint { border-collapse: collapse; width: 100%; }
table.blueprint th, table.blueprint td { border: 1px solid #ccc; padding: 0.5rem; vertical-align: top; }
.feedback-form { display: inline; margin-left: 0.5rem; }
.feedback-btn { border: none; background: none; cursor: pointer; }
.feedback-given { opacity: 0.5; }
.notice { color: #2a7a2a; }
pre { white-space: pre-wrap; background: #f6f6f6; padding: 0.5rem; }";

pub fn render_page(view: &PageView) -> String {
    let notice = view
        .notice
        .as_deref()
        .map(|n| format!("<p class=\"notice\">{}</p>", escape_html_text(n)))
        .unwrap_or_default();

    let download = if view.download_available {
        "<p><a id=\"download-btn\" href=\"/download\">Download as Word</a></p>"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Job Blueprint Generator</title><style>{STYLE}</style></head>\
         <body><h1>Job Blueprint Generator</h1>\
         <form method=\"post\" action=\"/generate\">\
         <input type=\"text\" id=\"job-title\" name=\"job_title\" placeholder=\"Enter a job title\" value=\"{title}\">\
         <button type=\"submit\">Generate Blueprint</button>\
         </form>\
         {notice}\
         <div id=\"blueprint-output\">{output}</div>\
         {download}\
         </body></html>",
        title = escape_html_attr(&view.job_title),
        output = render_output(&view.output),
    )
}

fn render_output(output: &Output) -> String {
    match output {
        Output::Empty => String::new(),
        Output::Message(message) => format!("<p>{}</p>", escape_html_text(message)),
        Output::Table(markup) => markup.clone(),
        Output::Error {
            context,
            message,
            raw_response,
        } => {
            let mut html = format!("<p>{context}: {}</p>", escape_html_text(message));
            if let Some(raw) = raw_response {
                html.push_str(&format!(
                    "<p>API Response:</p><pre>{}</pre>",
                    escape_html_text(raw)
                ));
            }
            html
        }
    }
}
