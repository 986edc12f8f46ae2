//! Validate a half-filled book dialog and print what each control shows.

use bookshelf_validator::prelude::*;
use bookshelf_validator::record;

fn main() {
    let layout = FormLayout::new()
        .field(FieldSpec::text("Name", "inpName").required())
        .field(FieldSpec::text("Author", "inpAuthor").required())
        .field(FieldSpec::date("ReleaseDate", "dpReleaseDate").required());

    let record = record! {
        "Name" => "Midnight Letters",
        "Author" => "  ",
    };

    let mut controls = layout.input_controls();
    let validator = FormValidator::new(ResourceBundle::english(), SystemClock);

    let valid = match layout.bind(&mut controls) {
        Ok(mut rules) => validator.validate(&record, &mut rules),
        Err(err) => {
            eprintln!("layout error: {err}");
            return;
        }
    };

    println!("valid: {valid}");
    for (id, control) in controls.iter() {
        println!("{id:>14}: {:?} {}", control.value_state(), control.value_state_text());
    }
}
