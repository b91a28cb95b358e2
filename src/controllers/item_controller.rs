use std::io::{BufRead, Write};

use crate::cli::input::Console;
use crate::cli::menu::{update_choice, update_menu_text, ItemField, UpdateChoice, UpdatableField};
use crate::cli::report_error;
use crate::models::NewItem;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::format_money;

pub struct ItemController<'a> {
    state: &'a AppState,
}

impl<'a> ItemController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn capture<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Add New Menu Item")?;
        let name = console.read_required("Item name: ")?;
        let price = console.read_decimal("Item price: ")?;

        let item = self.state.registry.create_item(NewItem { name, price }).await?;
        console.success(&format!(
            "Item {} (R{}) added with number {}.",
            item.name,
            format_money(item.price),
            item.id
        ))?;
        Ok(())
    }

    /// Un cambio de precio solo afecta a las líneas que se añadan después
    pub async fn update<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        loop {
            console.heading("Edit Menu Item")?;
            console.say(update_menu_text::<ItemField>())?;
            let number = console.read_integer("Enter a number: ")?;

            let field = match update_choice::<ItemField>(number) {
                Some(UpdateChoice::Field(field)) => field,
                Some(UpdateChoice::Return) => return Ok(()),
                None => {
                    console.failure("Invalid number entered.")?;
                    continue;
                }
            };

            let id = console.read_integer("Item number: ")?;
            let outcome = match field {
                ItemField::Name => {
                    let name = console.read_line("New Item Name: ")?;
                    self.state.registry.rename_item(id, &name).await
                }
                ItemField::Price => {
                    let price = console.read_decimal("New Item Price: ")?;
                    self.state.registry.reprice_item(id, price).await
                }
            };

            match outcome {
                Ok(()) => console.success(&format!("{} updated.", field.menu_label()))?,
                Err(e) => report_error(console, e)?,
            }
        }
    }
}
