use recipehub_api::ApiError;
use recipehub_api::error::GENERIC_MESSAGE;
use recipehub_app::AppError;
use recipehub_app::views::{
    CategoryTab, LOGIN_AGAIN_MESSAGE, LOGIN_REQUIRED_MESSAGE, Severity, notice_for,
};
use recipehub_core::error::ValidationErrors;
use recipehub_core::models::recipe::Category;

#[test]
fn validation_errors_become_field_messages() {
    let mut errors = ValidationErrors::new();
    errors.add("title", "Title is required");
    errors.add("servings", "Servings is required");

    let notice = notice_for(&AppError::Validation(errors));

    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(
        notice.fields,
        vec![
            ("servings".to_string(), "Servings is required".to_string()),
            ("title".to_string(), "Title is required".to_string()),
        ]
    );
}

#[test]
fn server_detail_is_shown() {
    let err = AppError::Api(ApiError::Status {
        status: 404,
        detail: Some("Recipe not found".into()),
    });
    let notice = notice_for(&err);
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Recipe not found");
    assert!(notice.fields.is_empty());
}

#[test]
fn missing_detail_falls_back_to_generic_message() {
    let err = AppError::Api(ApiError::Network("connection refused".into()));
    assert_eq!(notice_for(&err).message, GENERIC_MESSAGE);

    let err = AppError::Api(ApiError::Status {
        status: 500,
        detail: None,
    });
    assert_eq!(notice_for(&err).message, GENERIC_MESSAGE);
}

#[test]
fn authorization_failures_ask_for_login() {
    let expired = AppError::Api(ApiError::Unauthorized {
        status: 401,
        detail: Some("Could not validate credentials".into()),
    });
    assert_eq!(notice_for(&expired).message, LOGIN_AGAIN_MESSAGE);
    assert!(expired.needs_login());

    let anonymous = AppError::NotAuthenticated;
    assert_eq!(notice_for(&anonymous).message, LOGIN_REQUIRED_MESSAGE);
}

#[test]
fn category_tabs_parse() {
    assert_eq!(CategoryTab::parse("all"), Some(CategoryTab::All));
    assert_eq!(
        CategoryTab::parse("Dessert"),
        Some(CategoryTab::Category(Category::Dessert))
    );
    assert_eq!(CategoryTab::parse("brunch"), None);
    assert_eq!(CategoryTab::Category(Category::Snack).label(), "Snack");
}
