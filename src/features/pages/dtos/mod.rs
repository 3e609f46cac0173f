mod page_form_dto;

pub use page_form_dto::PageFormDto;
