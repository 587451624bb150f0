//! HTML rendering of a blueprint as a feedback-augmented table.
//!
//! Pure functions of their input. Every item carries a thumbs-up and a
//! thumbs-down affordance, each a submit button of a small form posting
//! `section`, `index` and `positive` to `/feedback`.

use crate::blueprint::feedback::FeedbackTarget;
use crate::blueprint::models::{Blueprint, Section};

pub fn render(blueprint: &Blueprint) -> String {
    render_with_feedback(blueprint, None)
}

/// Renders the table with the affordances of `given` de-emphasized.
pub fn render_with_feedback(blueprint: &Blueprint, given: Option<&FeedbackTarget>) -> String {
    let mut table = String::from("<table class=\"blueprint\">");
    table.push_str(&format!(
        "<tr><th colspan=\"2\">{}</th></tr>",
        escape_html_text(&blueprint.job_title)
    ));

    for section in Section::ALL {
        let given_index = given
            .filter(|target| target.section == section)
            .map(|target| target.index);
        table.push_str(&format!(
            "<tr data-section=\"{key}\"><td><strong>{label}</strong></td><td><ul>{items}</ul></td></tr>",
            key = section.key(),
            label = section.label(),
            items = render_feedback_list(blueprint.items(section), section, given_index),
        ));
    }

    table.push_str("</table>");
    table
}

fn render_feedback_list(items: &[String], section: Section, given_index: Option<usize>) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let class = if given_index == Some(index) {
                "feedback-btn feedback-given"
            } else {
                "feedback-btn"
            };
            format!(
                "<li><span class=\"item-text\">{text}</span>\
                 <form method=\"post\" action=\"/feedback\" class=\"feedback-form\">\
                 <input type=\"hidden\" name=\"section\" value=\"{key}\">\
                 <input type=\"hidden\" name=\"index\" value=\"{index}\">\
                 <button type=\"submit\" name=\"positive\" value=\"true\" class=\"{class}\" title=\"Helpful\">&#128077;</button>\
                 <button type=\"submit\" name=\"positive\" value=\"false\" class=\"{class}\" title=\"Not helpful\">&#128078;</button>\
                 </form></li>",
                text = escape_html_text(item),
                key = section.key(),
            )
        })
        .collect()
}

pub fn escape_html_text(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}

pub fn escape_html_attr(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    fn between<'a>(haystack: &'a str, start: &str, end: &str) -> &'a str {
        let from = haystack.find(start).expect("start marker") + start.len();
        let rest = &haystack[from..];
        &rest[..rest.find(end).expect("end marker")]
    }

    /// Recovers the blueprint from rendered table markup.
    pub(crate) fn parse_table(markup: &str) -> Blueprint {
        let job_title = unescape(between(markup, "<th colspan=\"2\">", "</th>"));
        let section_items = |section: Section| -> Vec<String> {
            let row = between(
                markup,
                &format!("<tr data-section=\"{}\">", section.key()),
                "</tr>",
            );
            row.split("<span class=\"item-text\">")
                .skip(1)
                .map(|chunk| unescape(&chunk[..chunk.find("</span>").expect("span end")]))
                .collect()
        };

        Blueprint {
            job_title,
            responsibilities: section_items(Section::Responsibilities),
            required_skills: section_items(Section::RequiredSkills),
            qualifications: section_items(Section::Qualifications),
        }
    }

    pub(crate) fn data_analyst() -> Blueprint {
        Blueprint {
            job_title: "Data Analyst".into(),
            responsibilities: vec!["Analyze data".into()],
            required_skills: vec!["SQL".into()],
            qualifications: vec!["BSc".into()],
        }
    }

    #[test]
    fn test_render_then_parse_recovers_blueprint() {
        let blueprints = [
            data_analyst(),
            Blueprint {
                job_title: "R&D <Lead> \"Platform\"".into(),
                responsibilities: vec![
                    "Own the roadmap".into(),
                    "Hire & mentor".into(),
                    "Ship </span> safely".into(),
                ],
                required_skills: vec![],
                qualifications: vec!["MSc or equivalent".into(), "5+ years".into()],
            },
        ];

        for blueprint in blueprints {
            assert_eq!(parse_table(&render(&blueprint)), blueprint);
        }
    }

    // Markup-significant fragments mixed with plain and non-ASCII text.
    fn arbitrary_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9 &<>\"'/éüñ日本]{0,16}",
            Just("</span>".to_string()),
            Just("</th></tr>".to_string()),
            Just("R&D".to_string()),
            Just("&lt;already escaped&gt;".to_string()),
            Just("<b>\"quoted\"</b>".to_string()),
        ]
    }

    prop_compose! {
        fn arbitrary_blueprint()
            (job_title in arbitrary_text(),
             responsibilities in prop::collection::vec(arbitrary_text(), 0..5),
             required_skills in prop::collection::vec(arbitrary_text(), 0..5),
             qualifications in prop::collection::vec(arbitrary_text(), 0..5))
            -> Blueprint
        {
            Blueprint { job_title, responsibilities, required_skills, qualifications }
        }
    }

    proptest! {
        #[test]
        fn prop_render_then_parse_recovers_any_blueprint(blueprint in arbitrary_blueprint()) {
            prop_assert_eq!(parse_table(&render(&blueprint)), blueprint);
        }

        #[test]
        fn prop_one_item_per_list_entry(blueprint in arbitrary_blueprint()) {
            let total = blueprint.responsibilities.len()
                + blueprint.required_skills.len()
                + blueprint.qualifications.len();
            prop_assert_eq!(render(&blueprint).matches("<li>").count(), total);
        }
    }

    #[test]
    fn test_data_analyst_table_shape() {
        let markup = render(&data_analyst());
        assert!(markup.contains("<th colspan=\"2\">Data Analyst</th>"));
        assert!(markup.contains("<strong>Responsibilities</strong>"));
        assert!(markup.contains("<strong>Required Skills</strong>"));
        assert!(markup.contains("<strong>Qualifications</strong>"));
        assert_eq!(markup.matches("<li>").count(), 3);
        assert_eq!(markup.matches("class=\"feedback-btn\"").count(), 6);
    }

    #[test]
    fn test_items_carry_feedback_coordinates() {
        let markup = render(&data_analyst());
        let skills_row = between(&markup, "<tr data-section=\"requiredSkills\">", "</tr>");
        assert!(skills_row.contains("name=\"section\" value=\"requiredSkills\""));
        assert!(skills_row.contains("name=\"index\" value=\"0\""));
        assert!(skills_row.contains("name=\"positive\" value=\"true\""));
        assert!(skills_row.contains("name=\"positive\" value=\"false\""));
    }

    #[test]
    fn test_feedback_target_is_de_emphasized() {
        let mut blueprint = data_analyst();
        blueprint.required_skills.push("Python".into());
        let target = FeedbackTarget {
            section: Section::RequiredSkills,
            index: 1,
        };

        let markup = render_with_feedback(&blueprint, Some(&target));
        assert_eq!(markup.matches("feedback-given").count(), 2);
        let skills_row = between(&markup, "<tr data-section=\"requiredSkills\">", "</tr>");
        let python = &skills_row[skills_row.find("Python").unwrap()..];
        assert!(python.contains("feedback-given"));
    }

    #[test]
    fn test_render_is_pure() {
        let blueprint = data_analyst();
        let before = blueprint.clone();
        assert_eq!(render(&blueprint), render(&blueprint));
        assert_eq!(blueprint, before);
    }

    #[test]
    fn test_escape_html_attr_escapes_quotes() {
        assert_eq!(escape_html_attr(r#"a"b'c"#), "a&quot;b&#39;c");
        assert_eq!(escape_html_text("<b>&"), "&lt;b&gt;&amp;");
    }
}
