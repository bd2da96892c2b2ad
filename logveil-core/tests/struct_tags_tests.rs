// logveil-core/tests/struct_tags_tests.rs
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};
use test_log::test;

use logveil_core::{
    FieldValue, LogveilError, RecordDescriptor, RedactionStrategy, Sanitizer, SanitizerConfig, TaggedRecord,
};

#[derive(Debug, Clone, Serialize)]
struct Profile {
    nickname: String,
    email: String,
}

impl TaggedRecord for Profile {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Profile>> = Lazy::new(|| {
            RecordDescriptor::<Profile>::builder("Profile")
                .field("nickname", "", |p| (&p.nickname).into())
                .field("email", "", |p| (&p.email).into())
                .build()
        });
        &DESCRIPTOR
    }
}

#[derive(Debug, Clone, Serialize)]
struct Customer {
    id: u64,
    email: String,
    contact_email: String,
    account_pin: u32,
    notes: String,
    middle_name: Option<String>,
    profile: Option<Profile>,
    aliases: Vec<String>,
    attributes: Value,
    #[serde(skip)]
    internal_score: f64,
}

impl TaggedRecord for Customer {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Customer>> = Lazy::new(|| {
            RecordDescriptor::<Customer>::builder("Customer")
                .field("id", "preserve", |c| c.id.into())
                .field("email", "preserve,sensitive", |c| (&c.email).into())
                .field("contact_email", "redact", |c| (&c.contact_email).into())
                .field("account_pin", "redact,sensitive", |c| c.account_pin.into())
                .field("notes", "sensitive", |c| (&c.notes).into())
                .field("middle_name", "", |c| (&c.middle_name).into())
                .field("profile", "", |c| FieldValue::optional_record(c.profile.as_ref()))
                .field("aliases", "", |c| (&c.aliases).into())
                .field("attributes", "", |c| FieldValue::Json(c.attributes.clone()))
                .unexported("internal_score")
                .build()
        });
        &DESCRIPTOR
    }
}

fn customer() -> Customer {
    Customer {
        id: 42,
        email: "keep@example.com".to_string(),
        contact_email: "contact@example.com".to_string(),
        account_pin: 1234,
        notes: "call back on jane@example.com".to_string(),
        middle_name: None,
        profile: Some(Profile {
            nickname: "jd".to_string(),
            email: "nested@example.com".to_string(),
        }),
        aliases: vec!["plain alias".to_string(), "alias@example.com".to_string()],
        attributes: json!({"phone": "+65 9123 4567", "tier": "gold"}),
        internal_score: 0.93,
    }
}

#[test]
fn annotations_drive_field_handling() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
    let record = customer();
    let out = Value::Object(sanitizer.sanitize_struct_with_tags(&record));

    assert_eq!(out["id"], 42);
    assert_eq!(out["email"], "keep@example.com");
    assert_eq!(out["contact_email"], "[REDACTED]");
    assert_eq!(out["account_pin"], "[REDACTED]");
    assert_eq!(out["notes"], "[REDACTED]");
    assert_eq!(out["middle_name"], Value::Null);
    assert_eq!(out["profile"], json!({"nickname": "jd", "email": "[REDACTED]"}));
    assert_eq!(out["aliases"], json!(["plain alias", "[REDACTED]"]));
    assert_eq!(out["attributes"], json!({"phone": "[REDACTED]", "tier": "gold"}));
    Ok(())
}

#[test]
fn unexported_fields_never_appear() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
    let record = customer();
    assert!(record.internal_score > 0.0);
    let out = sanitizer.sanitize_struct_with_tags(&record);
    assert!(!out.contains_key("internal_score"));
    assert_eq!(out.len(), 9);
    Ok(())
}

#[test]
fn redacted_non_strings_ignore_the_strategy() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default().with_strategy(RedactionStrategy::Hash))?;
    let out = sanitizer.sanitize_struct_with_tags(&customer());
    assert_eq!(out["account_pin"], "[REDACTED]");
    assert!(out["contact_email"].as_str().unwrap_or_default().starts_with("sha256:"));
    Ok(())
}

#[test]
fn remove_strategy_drops_redacted_fields() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default().with_strategy(RedactionStrategy::Remove))?;
    let out = sanitizer.sanitize_struct_with_tags(&customer());
    assert!(!out.contains_key("contact_email"));
    assert!(!out.contains_key("notes"));
    assert_eq!(out["email"], "keep@example.com");
    assert_eq!(out["account_pin"], "[REDACTED]");
    Ok(())
}

#[test]
fn records_past_max_depth_become_empty() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default().with_max_depth(1))?;
    let mut record = customer();
    record.attributes = json!({"outer": {"inner": {"email": "deep@example.com"}}});

    let out = Value::Object(sanitizer.sanitize_struct_with_tags(&record));
    // record 0 -> profile record 1 stays within bounds.
    assert_eq!(out["profile"]["email"], "[REDACTED]");
    // record 0 -> attributes map 1 -> outer map 2 is past the bound and kept as-is.
    assert_eq!(out["attributes"]["outer"], json!({"inner": {"email": "deep@example.com"}}));

    let depth_one = Sanitizer::new(SanitizerConfig::default().with_max_depth(1))?;
    let nested = Nested {
        label: "top",
        child: Some(Box::new(Nested {
            label: "middle",
            child: Some(Box::new(Nested { label: "bottom", child: None })),
        })),
    };
    let out = Value::Object(depth_one.sanitize_struct_with_tags(&nested));
    assert_eq!(out["label"], "top");
    assert_eq!(out["child"]["label"], "middle");
    assert_eq!(out["child"]["child"], json!({}));
    Ok(())
}

struct Nested {
    label: &'static str,
    child: Option<Box<Nested>>,
}

impl TaggedRecord for Nested {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Nested>> = Lazy::new(|| {
            RecordDescriptor::<Nested>::builder("Nested")
                .field("label", "", |n| FieldValue::Str(n.label))
                .field("child", "", |n| FieldValue::optional_record(n.child.as_deref()))
                .build()
        });
        &DESCRIPTOR
    }
}

#[test]
fn sanitize_struct_ignores_annotations() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
    let out = Value::Object(sanitizer.sanitize_struct(&customer())?);

    // `email` is preserved by annotation but redacted by name through the generic path.
    assert_eq!(out["email"], "[REDACTED]");
    assert_eq!(out["id"], 42);
    assert_eq!(out["account_pin"], 1234);
    assert_eq!(out["profile"]["email"], "[REDACTED]");
    assert!(out.get("internal_score").is_none());
    Ok(())
}

#[test]
fn sanitize_struct_requires_a_keyed_record() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
    let err = sanitizer.sanitize_struct(&"just a string").unwrap_err();
    assert!(matches!(err, LogveilError::NotAKeyedRecord(ref kind) if kind == "string"));
    Ok(())
}

struct Member {
    role: String,
    email: String,
}

impl TaggedRecord for Member {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Member>> = Lazy::new(|| {
            RecordDescriptor::<Member>::builder("Member")
                .field("role", "", |m| (&m.role).into())
                .field("email", "", |m| (&m.email).into())
                .build()
        });
        &DESCRIPTOR
    }
}

struct Team {
    label: String,
    members: Vec<Member>,
}

impl TaggedRecord for Team {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Team>> = Lazy::new(|| {
            RecordDescriptor::<Team>::builder("Team")
                .field("label", "", |t| (&t.label).into())
                .field("members", "", |t| FieldValue::records(&t.members))
                .build()
        });
        &DESCRIPTOR
    }
}

struct Org {
    team: Team,
}

impl TaggedRecord for Org {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: Lazy<RecordDescriptor<Org>> = Lazy::new(|| {
            RecordDescriptor::<Org>::builder("Org")
                .field("team", "", |o| FieldValue::record(&o.team))
                .build()
        });
        &DESCRIPTOR
    }
}

fn team() -> Team {
    Team {
        label: "ops".to_string(),
        members: vec![
            Member { role: "admin".to_string(), email: "lead@example.com".to_string() },
            Member { role: "viewer".to_string(), email: "guest@example.com".to_string() },
        ],
    }
}

#[test]
fn lists_of_records_are_sanitized_per_element() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
    let out = Value::Object(sanitizer.sanitize_struct_with_tags(&team()));
    assert_eq!(out["label"], "ops");
    assert_eq!(
        out["members"],
        json!([
            {"role": "admin", "email": "[REDACTED]"},
            {"role": "viewer", "email": "[REDACTED]"}
        ])
    );
    Ok(())
}

#[test]
fn lists_of_records_respect_max_depth() -> Result<()> {
    let sanitizer = Sanitizer::new(SanitizerConfig::default().with_max_depth(1))?;

    // team 0 -> members list 1 -> member records 2, past the bound.
    let out = Value::Object(sanitizer.sanitize_struct_with_tags(&team()));
    assert_eq!(out["members"], json!([{}, {}]));

    // org 0 -> team 1 -> members list 2 is past the bound and emitted raw.
    let org = Org { team: team() };
    let out = Value::Object(sanitizer.sanitize_struct_with_tags(&org));
    assert_eq!(out["team"]["label"], "ops");
    assert_eq!(
        out["team"]["members"],
        json!([
            {"role": "admin", "email": "lead@example.com"},
            {"role": "viewer", "email": "guest@example.com"}
        ])
    );
    Ok(())
}
