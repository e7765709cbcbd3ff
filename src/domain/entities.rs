pub mod json_text;
pub mod option_fields;
pub mod project;
pub mod project_query;
