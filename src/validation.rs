//! Field rules checked before any post reaches the store.
//!
//! Each operation has an ordered table of `(field, check, message)` rules. Every
//! rule runs, so a request gets back all of its violations in table order.

use validator::ValidateLength;

use crate::{
    models::{
        posts::{CreatePostDto, NewPost, UpdatePostDto},
        response::ValidationErrorEntry,
    },
    Error, Result,
};

pub const TITLE_MAX_LENGTH: u64 = 256;

const NOT_NULL: &str = "must not be null";
const TITLE_SIZE: &str = "size must be between 1 and 256";
const CONTENT_SIZE: &str = "size must be between 1 and 2147483647";

struct Rule<T> {
    field: &'static str,
    check: fn(&T) -> bool,
    message: &'static str,
}

const CREATE_RULES: &[Rule<CreatePostDto>] = &[
    Rule {
        field: "title",
        check: |p| p.title.is_some(),
        message: NOT_NULL,
    },
    Rule {
        field: "title",
        check: |p| title_fits(p.title.as_ref()),
        message: TITLE_SIZE,
    },
    Rule {
        field: "content",
        check: |p| p.content.is_some(),
        message: NOT_NULL,
    },
    Rule {
        field: "content",
        check: |p| content_fits(p.content.as_ref()),
        message: CONTENT_SIZE,
    },
];

const UPDATE_RULES: &[Rule<UpdatePostDto>] = &[
    Rule {
        field: "title",
        check: |p| title_fits(p.title.as_ref()),
        message: TITLE_SIZE,
    },
    Rule {
        field: "content",
        check: |p| content_fits(p.content.as_ref()),
        message: CONTENT_SIZE,
    },
];

// Absent values pass size checks; presence has its own rule.
fn title_fits(title: Option<&String>) -> bool {
    title.map_or(true, |t| {
        t.validate_length(Some(1_u64), Some(TITLE_MAX_LENGTH), None)
    })
}

fn content_fits(content: Option<&String>) -> bool {
    content.map_or(true, |c| c.validate_length(Some(1_u64), None, None))
}

fn violations<T>(rules: &[Rule<T>], params: &T) -> Vec<ValidationErrorEntry> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(params))
        .map(|rule| ValidationErrorEntry::new(rule.field, rule.message))
        .collect()
}

pub fn validate_create(params: CreatePostDto) -> Result<NewPost> {
    let errors = violations(CREATE_RULES, &params);
    match (params.title, params.content) {
        (Some(title), Some(content)) if errors.is_empty() => Ok(NewPost { title, content }),
        _ => Err(Error::Validation(errors)),
    }
}

pub fn validate_update(params: &UpdatePostDto) -> Result<()> {
    let errors = violations(UPDATE_RULES, params);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(result: Result<impl std::fmt::Debug>) -> Vec<(String, String)> {
        match result {
            Err(Error::Validation(errors)) => errors
                .into_iter()
                .map(|e| (e.field, e.message))
                .collect(),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn valid_create_passes_through() {
        let post = validate_create(CreatePostDto::new("hello", "world")).unwrap();
        assert_eq!(post.title, "hello");
        assert_eq!(post.content, "world");
    }

    #[test]
    fn empty_title_yields_one_entry() {
        let errors = entries(validate_create(CreatePostDto::new("", "x")));
        assert_eq!(
            errors,
            vec![("title".to_string(), "size must be between 1 and 256".to_string())]
        );
    }

    #[test]
    fn all_violations_are_collected_in_rule_order() {
        let errors = entries(validate_create(CreatePostDto::default()));
        assert_eq!(
            errors,
            vec![
                ("title".to_string(), NOT_NULL.to_string()),
                ("content".to_string(), NOT_NULL.to_string()),
            ]
        );

        let errors = entries(validate_create(CreatePostDto::new("", "")));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, "title");
        assert_eq!(errors[1], ("content".to_string(), CONTENT_SIZE.to_string()));
    }

    #[test]
    fn title_length_counts_characters() {
        let at_limit = "é".repeat(256);
        assert!(validate_create(CreatePostDto::new(at_limit, "x")).is_ok());

        let over = "a".repeat(257);
        let errors = entries(validate_create(CreatePostDto::new(over, "x")));
        assert_eq!(errors, vec![("title".to_string(), TITLE_SIZE.to_string())]);
    }

    #[test]
    fn update_only_checks_present_fields() {
        assert!(validate_update(&UpdatePostDto::default()).is_ok());

        let params = UpdatePostDto {
            title: Some("renamed".into()),
            content: None,
        };
        assert!(validate_update(&params).is_ok());

        let params = UpdatePostDto {
            title: Some(String::new()),
            content: Some(String::new()),
        };
        let errors = entries(validate_update(&params));
        assert_eq!(
            errors,
            vec![
                ("title".to_string(), TITLE_SIZE.to_string()),
                ("content".to_string(), CONTENT_SIZE.to_string()),
            ]
        );
    }
}
