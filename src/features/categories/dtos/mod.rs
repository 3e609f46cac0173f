mod category_form_dto;

pub use category_form_dto::CategoryFormDto;
