use serde_json::json;
use service_adapter::{
    AdapterError, ErrorKind, InstanceGroup, Plan, Properties, RequestParameters,
    ServiceDeployment, ServiceRelease, ServiceReleases, Stemcell, Validate,
};

fn release(name: &str) -> ServiceRelease {
    ServiceRelease {
        name: name.to_string(),
        version: "4.2".to_string(),
        jobs: vec![format!("{}-server", name)],
    }
}

fn deployment() -> ServiceDeployment {
    ServiceDeployment {
        deployment_name: "service-instance_a1b2".to_string(),
        releases: ServiceReleases::from(vec![release("redis"), release("metrics")]),
        stemcell: Stemcell {
            os: "ubuntu-jammy".to_string(),
            version: "1.181".to_string(),
        },
    }
}

fn instance_group(name: &str) -> InstanceGroup {
    InstanceGroup {
        name: name.to_string(),
        vm_type: "small".to_string(),
        persistent_disk: Some("ten".to_string()),
        instances: 1,
        networks: vec!["services".to_string()],
        azs: vec!["z1".to_string()],
        lifecycle: None,
    }
}

fn plan() -> Plan {
    Plan {
        properties: Properties::new(),
        instance_groups: vec![instance_group("redis"), instance_group("sentinel")],
    }
}

fn failed_field(result: service_adapter::Result<()>) -> String {
    match result {
        Err(AdapterError::ValidationError { field, .. }) => field,
        other => panic!("expected a field validation error, got {other:?}"),
    }
}

#[test]
fn test_valid_deployment_and_plan() {
    assert!(deployment().validate().is_ok());
    assert!(plan().validate().is_ok());
}

#[test]
fn test_deployment_missing_name() {
    let mut d = deployment();
    d.deployment_name.clear();
    assert_eq!(failed_field(d.validate()), "deployment_name");
}

#[test]
fn test_deployment_missing_releases() {
    let mut d = deployment();
    d.releases = ServiceReleases::default();

    let err = d.validate().unwrap_err();
    assert!(matches!(err, AdapterError::NoReleasesSpecified));
    assert_eq!(err.to_string(), "no releases specified");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_deployment_missing_stemcell_fields() {
    let mut d = deployment();
    d.stemcell.os.clear();
    assert_eq!(failed_field(d.validate()), "stemcell.stemcell_os");

    let mut d = deployment();
    d.stemcell.version.clear();
    assert_eq!(failed_field(d.validate()), "stemcell.stemcell_version");
}

#[test]
fn test_empty_releases_is_distinct_from_field_failures() {
    let empty = ServiceReleases::default();
    assert!(matches!(empty.validate(), Err(AdapterError::NoReleasesSpecified)));

    let mut broken = release("redis");
    broken.name.clear();
    let releases = ServiceReleases::from(vec![release("metrics"), broken]);
    assert_eq!(failed_field(releases.validate()), "releases[1].name");
}

#[test]
fn test_release_without_jobs() {
    let mut r = release("redis");
    r.jobs.clear();
    assert!(matches!(
        r.validate(),
        Err(AdapterError::ValidationError { ref field, ref rule }) if field == "jobs" && rule == "min"
    ));

    let mut d = deployment();
    d.releases = ServiceReleases::from(vec![r]);
    assert_eq!(failed_field(d.validate()), "releases[0].jobs");
}

#[test]
fn test_plan_dives_into_instance_groups() {
    let mut p = plan();
    p.instance_groups[1].instances = 0;
    assert_eq!(failed_field(p.validate()), "instance_groups[1].instances");

    let mut p = plan();
    p.instance_groups[0].azs.clear();
    assert_eq!(failed_field(p.validate()), "instance_groups[0].azs");

    let mut p = plan();
    p.instance_groups[1].vm_type.clear();
    assert_eq!(failed_field(p.validate()), "instance_groups[1].vm_type");
}

#[test]
fn test_instance_group_networks_may_be_empty() {
    let mut p = plan();
    p.instance_groups[0].networks.clear();
    assert!(p.validate().is_ok());
}

#[test]
fn test_plan_reports_first_invalid_group() {
    let mut p = plan();
    p.instance_groups[0].name.clear();
    p.instance_groups[1].instances = -1;
    assert_eq!(failed_field(p.validate()), "instance_groups[0].name");
}

#[test]
fn test_arbitrary_params() {
    assert!(RequestParameters::default().arbitrary_params().unwrap().is_empty());

    let params: RequestParameters =
        serde_json::from_value(json!({"plan_id": "small", "parameters": {"a": 1}})).unwrap();
    let expected = json!({"a": 1});
    assert_eq!(params.arbitrary_params().unwrap(), *expected.as_object().unwrap());

    let params: RequestParameters = serde_json::from_value(json!({"parameters": "a=1"})).unwrap();
    let err = params.arbitrary_params().unwrap_err();
    assert!(matches!(err, AdapterError::InvalidParametersShape { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
