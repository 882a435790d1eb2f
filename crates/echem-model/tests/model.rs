//! Tests for echem-model types.

use echem_model::{Dimension, FieldDescriptor, Schema, SchemaError};

fn ec_schema() -> Schema {
    Schema::new(vec![
        FieldDescriptor::new("t").with_unit("s"),
        FieldDescriptor::new("E").with_unit("V").with_reference("RHE"),
        FieldDescriptor::new("j").with_unit("uA / cm2"),
        FieldDescriptor::auto_generated("x"),
    ])
}

#[test]
fn schema_serializes_as_fields_object() {
    insta::assert_json_snapshot!(ec_schema(), @r#"
    {
      "fields": [
        {
          "name": "t",
          "unit": "s"
        },
        {
          "name": "E",
          "unit": "V",
          "reference": "RHE"
        },
        {
          "name": "j",
          "unit": "uA / cm2"
        },
        {
          "name": "x",
          "comment": "auto-generated"
        }
      ]
    }
    "#);
}

#[test]
fn schema_deserializes_user_metadata() {
    let json = r#"{"fields": [
        {"name": "t", "unit": "s", "dimension": "time"},
        {"name": "E", "unit": "V", "reference": "RHE"}
    ]}"#;
    let schema: Schema = serde_json::from_str(json).unwrap();

    assert_eq!(schema.field_names(), vec!["t", "E"]);
    assert_eq!(
        schema.field("t").and_then(|f| f.dimension),
        Some(Dimension::Time)
    );
    assert!(schema.field("j").is_none());
}

#[test]
fn rename_then_project_leaves_source_schema_intact() {
    let source = Schema::new(vec![
        FieldDescriptor::new("mode"),
        FieldDescriptor::new("time/s").with_unit("s"),
        FieldDescriptor::new("Ewe/V").with_unit("V"),
    ]);
    let renamed = source.renamed(|name| match name {
        "time/s" => Some("t"),
        "Ewe/V" => Some("E"),
        _ => None,
    });
    let projected = renamed.project(&["t", "E"]);

    assert_eq!(projected.field_names(), vec!["t", "E"]);
    assert_eq!(projected.field("t").and_then(|f| f.unit.as_deref()), Some("s"));
    assert_eq!(source.field_names(), vec!["mode", "time/s", "Ewe/V"]);
}

#[test]
fn validation_distinguishes_count_from_names() {
    let schema = ec_schema();

    let count = schema.validate_against(&["t", "E", "j"]).unwrap_err();
    assert!(count.is_count_mismatch());

    let names = schema.validate_against(&["t", "E", "j", "y"]).unwrap_err();
    assert!(!names.is_count_mismatch());
    assert_eq!(
        names,
        SchemaError::MissingField {
            name: "y".to_string()
        }
    );
}
