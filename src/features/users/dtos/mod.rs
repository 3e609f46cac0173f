mod registration_dto;

pub use registration_dto::{
    PictureUpload, RegisterFormDto, RegistrationForm, UserFormDto, UserProfileFormDto,
};
