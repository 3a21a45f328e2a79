use crate::shared::errors::AppError;

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_ISBN_LENGTH: usize = 13;
pub const MAX_DIMENSIONS_LENGTH: usize = 50;

pub struct Validator;

impl Validator {
    pub fn validate_author_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Author name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Author name too long (max {} characters)",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_book_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Title too long (max {} characters)",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_isbn(isbn: &str) -> Result<(), AppError> {
        if isbn.trim().is_empty() {
            return Err(AppError::ValidationError("ISBN cannot be empty".to_string()));
        }
        if isbn.chars().count() > MAX_ISBN_LENGTH {
            return Err(AppError::ValidationError(format!(
                "ISBN too long (max {} characters)",
                MAX_ISBN_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_book_manage_id(book_manage_id: &str) -> Result<(), AppError> {
        if book_manage_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Book manage id cannot be empty".to_string(),
            ));
        }
        if book_manage_id.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::ValidationError(
                "Book manage id too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
        if quantity < 0 {
            return Err(AppError::ValidationError(
                "Quantity cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_price(price: f64) -> Result<(), AppError> {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::ValidationError(
                "Price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_dimensions(dimensions: &str) -> Result<(), AppError> {
        if dimensions.chars().count() > MAX_DIMENSIONS_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Dimensions too long (max {} characters)",
                MAX_DIMENSIONS_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<(), AppError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::ValidationError(
                "URL must start with http:// or https://".to_string(),
            ));
        }
        Ok(())
    }
}
