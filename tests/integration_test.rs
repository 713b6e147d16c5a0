use ecs_elbless::error::{ElblessError, Result};

#[test]
fn test_error_types() {
    let err = ElblessError::Resolution {
        task_id: "166c6aa6-13d2-4f77-b176-3d5a33c1ae3a".to_string(),
        reason: "EC2 instance i-0123456789 not found".to_string(),
    };

    assert!(err.to_string().contains("166c6aa6"));
    assert!(err.to_string().contains("i-0123456789"));
}

#[test]
fn test_result_alias() {
    let ok: Result<u16> = Ok(32768);
    assert_eq!(ok.unwrap(), 32768);
}

#[test]
fn test_version_const() {
    assert!(!ecs_elbless::VERSION.is_empty());
}
