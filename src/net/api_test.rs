use super::*;

// =============================================================
// Endpoint formatters
// =============================================================

#[test]
fn product_endpoints_format_ids() {
    assert_eq!(product_endpoint(7), "/api/products/7");
    assert_eq!(product_image_endpoint(7), "/api/products/7/image");
    assert_eq!(product_comments_endpoint(7), "/api/products/7/comments");
    assert_eq!(comment_endpoint(12), "/api/products/comments/12");
}

#[test]
fn client_data_endpoints_format_uid() {
    assert_eq!(client_profile_endpoint("f1c2"), "/api/client-data/f1c2");
    assert_eq!(
        toggle_coupon_endpoint("f1c2", false),
        "/api/client-data/f1c2/toggle-coupon?useCoupon=false"
    );
    assert_eq!(
        toggle_coupon_endpoint("f1c2", true),
        "/api/client-data/f1c2/toggle-coupon?useCoupon=true"
    );
}

// =============================================================
// Headers and error classification
// =============================================================

#[test]
fn bearer_header_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn status_classification() {
    assert_eq!(ApiError::from_status(401), ApiError::Unauthorized);
    assert_eq!(ApiError::from_status(403), ApiError::Forbidden);
    assert_eq!(ApiError::from_status(404), ApiError::NotFound);
    assert_eq!(ApiError::from_status(500), ApiError::Status(500));
    assert_eq!(ApiError::from_status(400), ApiError::Status(400));
}
