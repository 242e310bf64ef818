use std::fs;

use quiztake::model::{OptionId, QuestionId};

#[test]
fn test_parse_sample_quiz() {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = quiztake::parser::parse_quiz(&content, "sample_quiz.md", "sha256:test").unwrap();

    assert_eq!(quiz.title, "Networking Basics");
    assert_eq!(quiz.frontmatter.time_limit, 20);
    assert_eq!(quiz.questions.len(), 3);

    let q1 = &quiz.questions[0];
    assert_eq!(q1.number, 1);
    assert_eq!(q1.id, QuestionId::new("1"));
    assert_eq!(q1.title, "Transport protocols");
    assert_eq!(q1.body, vec!["Which protocol guarantees in-order delivery?".to_string()]);
    assert_eq!(q1.choices.len(), 3);
    assert_eq!(q1.choices[0].label, 'a');
    assert_eq!(q1.choices[0].text, "UDP");
    assert!(!q1.choices[0].correct);
    assert!(q1.choices[1].correct);
    assert_eq!(q1.choices[1].option_id(), OptionId::new("b"));

    let q2 = &quiz.questions[1];
    assert_eq!(q2.choices.len(), 4);
    assert_eq!(q2.choices[3].text, "128");
}

#[test]
fn test_preamble_parsing() {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = quiztake::parser::parse_quiz(&content, "test.md", "sha256:test").unwrap();

    assert_eq!(quiz.preamble.len(), 1);
    assert!(quiz.preamble[0].contains("Read every question carefully"));
}

#[test]
fn test_heading_title_used_without_frontmatter_title() {
    let content = fs::read_to_string("fixtures/unkeyed_quiz.md").expect("Cannot read fixture");
    let quiz = quiztake::parser::parse_quiz(&content, "unkeyed_quiz.md", "sha256:test").unwrap();

    assert_eq!(quiz.title, "Opinion Poll");
    assert!(!quiz.has_answer_key());
    assert_eq!(
        quiz.question_ids(),
        vec![QuestionId::new("1"), QuestionId::new("2")]
    );
}

#[test]
fn test_missing_frontmatter_rejected() {
    let err = quiztake::parser::parse_quiz("# Title\n\n## 1. Q\n\n- [ ] a\n", "x.md", "h")
        .unwrap_err();
    assert!(err.contains("frontmatter"), "{}", err);
}

#[test]
fn test_non_positive_time_limit_rejected() {
    let content = "---\ntime_limit: 0\n---\n\n## 1. Q\n\n- [ ] a\n";
    let err = quiztake::parser::parse_quiz(content, "x.md", "h").unwrap_err();
    assert!(err.contains("time_limit"), "{}", err);
}

#[test]
fn test_question_without_options_rejected() {
    let content = "---\ntime_limit: 10\n---\n\n## 1. Empty\n\nNo options here.\n";
    let err = quiztake::parser::parse_quiz(content, "x.md", "h").unwrap_err();
    assert!(err.contains("no options"), "{}", err);
}

#[test]
fn test_bad_heading_rejected() {
    let content = "---\ntime_limit: 10\n---\n\n## Untitled\n\n- [ ] a\n";
    let err = quiztake::parser::parse_quiz(content, "x.md", "h").unwrap_err();
    assert!(err.contains("## N. Title"), "{}", err);
}

#[test]
fn test_quiz_without_questions_rejected() {
    let content = "---\ntime_limit: 10\n---\n\n# Only a title\n";
    let err = quiztake::parser::parse_quiz(content, "x.md", "h").unwrap_err();
    assert!(err.contains("no questions"), "{}", err);
}

fn quiz_with_options(count: usize) -> String {
    let mut content = String::from("---\ntime_limit: 10\n---\n\n## 1. Crowded\n\nPick one.\n\n");
    for i in 0..count {
        content.push_str(&format!("- [ ] option {}\n", i));
    }
    content
}

#[test]
fn test_twenty_six_options_accepted() {
    let quiz = quiztake::parser::parse_quiz(&quiz_with_options(26), "x.md", "h").unwrap();
    let choices = &quiz.questions[0].choices;
    assert_eq!(choices.len(), 26);
    assert_eq!(choices[25].label, 'z');
}

#[test]
fn test_too_many_options_rejected() {
    for count in [27, 200, 300] {
        let err = quiztake::parser::parse_quiz(&quiz_with_options(count), "x.md", "h").unwrap_err();
        assert!(err.contains("more than 26 options"), "{}: {}", count, err);
    }
}
