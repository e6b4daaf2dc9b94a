use hookwire::{FieldKind, Record};
use hookwire_api::models::{
    ApplicationIn, DashboardAccessOut, EndpointCreatedEvent, EndpointCreatedEventData,
    EndpointUpdate, EventTypeIn, EventTypeUpdate,
};
use hookwire_core::{OAS30Spec, SchemaTable, TableMismatch};
use test_log::test;

static WEBHOOK_API_YAML: &str = include_str!("../../test-data/webhook-api.yaml");

fn spec() -> anyhow::Result<OAS30Spec> {
    Ok(WEBHOOK_API_YAML.parse()?)
}

fn check<R: Record>(spec: &OAS30Spec) -> anyhow::Result<Vec<TableMismatch>> {
    Ok(spec.check_record::<R>(R::SCHEMA.name)?)
}

#[test]
fn records_match_api_document() -> anyhow::Result<()> {
    let spec = spec()?;
    let results = [
        ("ApplicationIn", check::<ApplicationIn>(&spec)?),
        ("DashboardAccessOut", check::<DashboardAccessOut>(&spec)?),
        ("EndpointCreatedEvent", check::<EndpointCreatedEvent>(&spec)?),
        ("EndpointCreatedEventData", check::<EndpointCreatedEventData>(&spec)?),
        ("EndpointUpdate", check::<EndpointUpdate>(&spec)?),
        ("EventTypeIn", check::<EventTypeIn>(&spec)?),
        ("EventTypeUpdate", check::<EventTypeUpdate>(&spec)?),
    ];
    for (name, mismatches) in results {
        assert!(mismatches.is_empty(), "{name}: {mismatches:?}");
    }
    Ok(())
}

#[test]
fn every_record_has_a_schema() -> anyhow::Result<()> {
    let spec = spec()?;
    let names: Vec<_> = spec.schema_names().collect();
    for record in [
        ApplicationIn::SCHEMA.name,
        DashboardAccessOut::SCHEMA.name,
        EndpointCreatedEvent::SCHEMA.name,
        EndpointCreatedEventData::SCHEMA.name,
        EndpointUpdate::SCHEMA.name,
        EventTypeIn::SCHEMA.name,
        EventTypeUpdate::SCHEMA.name,
    ] {
        assert!(names.contains(&record), "no schema for {record}");
    }
    Ok(())
}

#[test]
fn mismatch_is_reported() -> anyhow::Result<()> {
    // EventTypeIn carries `name` on top of what EventTypeUpdate declares
    let mismatches = spec()?.check_record::<EventTypeUpdate>("EventTypeIn")?;
    assert_eq!(vec![TableMismatch::MissingField("name".to_string())], mismatches);
    Ok(())
}

#[test]
fn compiled_table_round_trips_through_schema_table() -> anyhow::Result<()> {
    let expected = spec()?.schema_table("EndpointUpdate")?;
    let compiled = SchemaTable::from_record_schema(&EndpointUpdate::SCHEMA);
    assert_eq!(expected.len(), compiled.len());
    for entry in expected.iter() {
        let ours = compiled.get(&entry.key).unwrap();
        assert_eq!(entry.kind, ours.kind, "{}", entry.key);
        assert_eq!(entry.name, ours.name, "{}", entry.key);
    }
    assert_eq!(
        FieldKind::Nullable,
        expected.get("filterTypes").unwrap().kind
    );
    Ok(())
}
