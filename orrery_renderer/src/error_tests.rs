use super::*;

#[test]
fn test_display_capacity_exceeded() {
    let err = Error::CapacityExceeded { capacity: 100 };
    assert_eq!(err.to_string(), "Scene capacity exceeded (capacity: 100)");
}

#[test]
fn test_display_unsupported_operation() {
    let err = Error::UnsupportedOperation("update_primitive".to_string());
    assert_eq!(err.to_string(), "Unsupported operation: update_primitive");
}

#[test]
fn test_display_invalid_resource() {
    let err = Error::InvalidResource("readback buffer too small".to_string());
    assert_eq!(
        err.to_string(),
        "Invalid resource: readback buffer too small"
    );
}

#[test]
fn test_display_backend_error() {
    let err = Error::BackendError("vkQueueSubmit failed".to_string());
    assert_eq!(err.to_string(), "Backend error: vkQueueSubmit failed");
}

#[test]
fn test_display_out_of_memory() {
    assert_eq!(Error::OutOfMemory.to_string(), "Out of GPU memory");
}

#[test]
fn test_error_is_std_error() {
    fn assert_std_error<E: std::error::Error>(_: &E) {}
    assert_std_error(&Error::OutOfMemory);
}

#[test]
fn test_result_alias() {
    fn fails() -> Result<u32> {
        Err(Error::InitializationFailed("no device".to_string()))
    }
    assert!(fails().is_err());
}
