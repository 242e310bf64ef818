use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::model::*;

pub fn parse_quiz(content: &str, quiz_file: &str, quiz_hash: &str) -> Result<Quiz, String> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let fm: Frontmatter =
        serde_yaml::from_str(&frontmatter).map_err(|e| format!("Invalid frontmatter: {}", e))?;

    if fm.time_limit <= 0 {
        return Err(format!(
            "time_limit must be a positive number of minutes, got {}",
            fm.time_limit
        ));
    }

    let (title, preamble, questions) = parse_body(&body)?;
    if questions.is_empty() {
        return Err("Quiz file contains no questions".to_string());
    }

    let title = fm.title.clone().unwrap_or(title);

    Ok(Quiz {
        frontmatter: fm,
        title,
        preamble,
        questions,
        quiz_file: quiz_file.to_string(),
        quiz_hash: quiz_hash.to_string(),
    })
}

fn split_frontmatter(content: &str) -> Result<(String, String), String> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err("Quiz file must start with YAML frontmatter (---)".to_string());
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or_else(|| "No closing --- for frontmatter".to_string())?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();

    Ok((fm, body))
}

#[derive(Default)]
struct PendingQuestion {
    heading: String,
    body: Vec<String>,
    choices: Vec<Choice>,
    /// Task items past `z`, counted but never labelled.
    overflow: usize,
}

const MAX_CHOICES: usize = 26;

fn parse_body(body: &str) -> Result<(String, Vec<String>, Vec<Question>), String> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut title = String::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut questions: Vec<Question> = Vec::new();

    let mut current: Option<PendingQuestion> = None;
    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut in_item = false;
    let mut item_text = String::new();
    let mut task_checked: Option<bool> = None;
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    for event in Parser::new_ext(body, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                HeadingLevel::H1 => in_h1 = true,
                HeadingLevel::H2 => {
                    if let Some(pending) = current.take() {
                        questions.push(finalize_question(pending)?);
                    }
                    current = Some(PendingQuestion::default());
                    in_h2 = true;
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                HeadingLevel::H1 => in_h1 = false,
                HeadingLevel::H2 => in_h2 = false,
                _ => {}
            },
            Event::Start(Tag::Item) => {
                in_item = true;
                item_text.clear();
                task_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_item = false;
                if let Some(q) = current.as_mut() {
                    let text = item_text.trim().to_string();
                    match task_checked {
                        Some(_) if q.choices.len() >= MAX_CHOICES => q.overflow += 1,
                        Some(checked) => {
                            let label = char::from(b'a' + q.choices.len() as u8);
                            q.choices.push(Choice {
                                label,
                                text,
                                correct: checked,
                            });
                        }
                        None if !text.is_empty() => q.body.push(format!("• {}", text)),
                        None => {}
                    }
                }
            }
            Event::TaskListMarker(checked) => {
                task_checked = Some(checked);
            }
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let text = paragraph_text.trim().to_string();
                if in_item || text.is_empty() {
                    continue;
                }
                match current.as_mut() {
                    Some(q) => q.body.push(text),
                    None => preamble.push(text),
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if in_h1 {
                    title.push_str(&text);
                } else if in_h2 {
                    if let Some(q) = current.as_mut() {
                        q.heading.push_str(&text);
                    }
                } else if in_item {
                    item_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_item {
                    item_text.push(' ');
                } else if in_paragraph {
                    paragraph_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(pending) = current.take() {
        questions.push(finalize_question(pending)?);
    }

    Ok((title, preamble, questions))
}

fn finalize_question(pending: PendingQuestion) -> Result<Question, String> {
    let (number, title) = parse_h2_title(&pending.heading)?;
    if pending.choices.is_empty() {
        return Err(format!("Question {} has no options", number));
    }
    if pending.overflow > 0 {
        return Err(format!(
            "Question {} has more than {} options",
            number, MAX_CHOICES
        ));
    }
    if pending.choices.iter().filter(|c| c.correct).count() > 1 {
        return Err(format!("Question {} marks more than one correct option", number));
    }

    Ok(Question {
        number,
        id: QuestionId(number.to_string()),
        title,
        body: pending.body,
        choices: pending.choices,
    })
}

fn parse_h2_title(text: &str) -> Result<(u32, String), String> {
    let trimmed = text.trim();
    // Expected format: "1. Title text"
    if let Some(dot_pos) = trimmed.find('.') {
        let num_str = trimmed[..dot_pos].trim();
        let title = trimmed[dot_pos + 1..].trim().to_string();
        let number: u32 = num_str
            .parse()
            .map_err(|_| format!("Invalid question number in heading: {}", trimmed))?;
        Ok((number, title))
    } else {
        Err(format!(
            "Question heading must be in format '## N. Title', got: {}",
            trimmed
        ))
    }
}
