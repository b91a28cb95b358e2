//! Definición de menús
//!
//! Los números de opción son los que escribe el operador.

use crate::models::{CustomerField, DriverField, RestaurantField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    CaptureOrder,
    AddItemsToOrder,
    FindOrder,
    ListIncomplete,
    ListPending,
    ListDriverOrders,
    FinaliseOrder,
    CaptureCustomer,
    UpdateCustomer,
    CaptureRestaurant,
    UpdateRestaurant,
    AddMenuItem,
    EditMenuItem,
    CaptureDriver,
    UpdateDriver,
    Exit,
}

impl MainMenuOption {
    pub const ALL: [MainMenuOption; 16] = [
        MainMenuOption::CaptureOrder,
        MainMenuOption::AddItemsToOrder,
        MainMenuOption::FindOrder,
        MainMenuOption::ListIncomplete,
        MainMenuOption::ListPending,
        MainMenuOption::ListDriverOrders,
        MainMenuOption::FinaliseOrder,
        MainMenuOption::CaptureCustomer,
        MainMenuOption::UpdateCustomer,
        MainMenuOption::CaptureRestaurant,
        MainMenuOption::UpdateRestaurant,
        MainMenuOption::AddMenuItem,
        MainMenuOption::EditMenuItem,
        MainMenuOption::CaptureDriver,
        MainMenuOption::UpdateDriver,
        MainMenuOption::Exit,
    ];

    pub fn from_number(number: i32) -> Option<Self> {
        if number < 1 {
            return None;
        }
        Self::ALL.get(number as usize - 1).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MainMenuOption::CaptureOrder => "Capture New Order",
            MainMenuOption::AddItemsToOrder => "Add Items To Existing Order",
            MainMenuOption::FindOrder => "Find and Display Order",
            MainMenuOption::ListIncomplete => "List Orders With Incomplete Information",
            MainMenuOption::ListPending => "List Pending Orders",
            MainMenuOption::ListDriverOrders => "List Orders Allocated To A Specific Driver",
            MainMenuOption::FinaliseOrder => "Finalise Order",
            MainMenuOption::CaptureCustomer => "Capture New Customer",
            MainMenuOption::UpdateCustomer => "Update Existing Customers",
            MainMenuOption::CaptureRestaurant => "Capture New Restaurant",
            MainMenuOption::UpdateRestaurant => "Update Existing Restaurant",
            MainMenuOption::AddMenuItem => "Add New Menu Item",
            MainMenuOption::EditMenuItem => "Edit Menu Item",
            MainMenuOption::CaptureDriver => "Capture New Driver",
            MainMenuOption::UpdateDriver => "Update Driver",
            MainMenuOption::Exit => "Exit",
        }
    }
}

/// Texto numerado de un menú: "1. Primera\n2. Segunda..."
pub fn numbered(labels: &[&str]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| format!("{}. {}", index + 1, label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn main_menu_text() -> String {
    let labels: Vec<&str> = MainMenuOption::ALL.iter().map(|o| o.label()).collect();
    numbered(&labels)
}

pub const RETURN_TO_MAIN_MENU: &str = "Return to Main Menu";

/// Selección en un sub-menú de actualización
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChoice<F> {
    Field(F),
    Return,
}

/// Campos que se pueden elegir en un menú de actualización
pub trait UpdatableField: Copy + 'static {
    fn fields() -> &'static [Self];
    fn menu_label(&self) -> &'static str;
}

impl UpdatableField for CustomerField {
    fn fields() -> &'static [Self] {
        &CustomerField::ALL
    }

    fn menu_label(&self) -> &'static str {
        self.label()
    }
}

impl UpdatableField for RestaurantField {
    fn fields() -> &'static [Self] {
        &RestaurantField::ALL
    }

    fn menu_label(&self) -> &'static str {
        self.label()
    }
}

impl UpdatableField for DriverField {
    fn fields() -> &'static [Self] {
        &DriverField::ALL
    }

    fn menu_label(&self) -> &'static str {
        self.label()
    }
}

/// Campos de item; el precio necesita un decimal y no un texto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Price,
}

impl ItemField {
    pub const ALL: [ItemField; 2] = [ItemField::Name, ItemField::Price];
}

impl UpdatableField for ItemField {
    fn fields() -> &'static [Self] {
        &ItemField::ALL
    }

    fn menu_label(&self) -> &'static str {
        match self {
            ItemField::Name => "Item Name",
            ItemField::Price => "Item Price",
        }
    }
}

pub fn update_menu_text<F: UpdatableField>() -> String {
    let mut labels: Vec<&str> = F::fields().iter().map(|f| f.menu_label()).collect();
    labels.push(RETURN_TO_MAIN_MENU);
    numbered(&labels)
}

/// `None` cuando el número está fuera de rango
pub fn update_choice<F: UpdatableField>(number: i32) -> Option<UpdateChoice<F>> {
    let fields = F::fields();
    if number < 1 {
        return None;
    }
    let index = number as usize - 1;
    if index < fields.len() {
        Some(UpdateChoice::Field(fields[index]))
    } else if index == fields.len() {
        Some(UpdateChoice::Return)
    } else {
        None
    }
}
