//! Test fixtures and factory functions for creating test data.

use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};

/// Model output for a small Dutch/German list.
pub fn model_answer() -> String {
    word_list_json().to_string()
}

/// Dutch/German word list as the vision model would return it.
pub fn word_list_json() -> Value {
    json!({
        "languages": { "a": "nl", "b": "de" },
        "items": [
            { "a": "de hond", "b": ["der Hund"] },
            { "a": "de kat", "b": ["die Katze"] },
            { "a": "de school", "b": ["die Schule"] },
            { "a": "lopen", "b": ["laufen", "gehen"] },
            { "a": "de vader", "b": ["der Vater"] },
            { "a": "de vogel", "b": ["der Vogel"] },
            { "a": "het huis", "b": ["das Haus"] },
            { "a": "de straat", "b": ["die Straße"] },
            { "a": "de kaas", "b": ["der Käse"] },
            { "a": "de moeder", "b": ["die Mutter"] }
        ]
    })
}

/// Multipart form carrying a fake JPEG under the `image` field.
pub fn image_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xff, 0xd8, 0xff, 0xe0])
            .file_name("page.jpg")
            .mime_type("image/jpeg"),
    )
}

/// Multipart form without an image.
pub fn form_without_image() -> MultipartForm {
    MultipartForm::new().add_text("note", "forgot the photo")
}

pub fn build_request(seed: u64) -> Value {
    json!({
        "word_list": word_list_json(),
        "scope": "1",
        "seed": seed
    })
}

pub fn check_request(answer: &str, references: &[&str], language: Option<&str>) -> Value {
    json!({
        "answer": answer,
        "references": references,
        "language": language
    })
}
