use serde::Serialize;

use crate::booking::VehicleClass;

/// One bookable vehicle class as presented on the fleet section.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOption {
    pub class: VehicleClass,
    pub label: &'static str,
    pub price_from_eur: u32,
    pub description: &'static str,
}

pub const FLEET: [VehicleOption; 5] = [
    VehicleOption {
        class: VehicleClass::Standard,
        label: "Standart",
        price_from_eur: 250,
        description: "Ford Focus, Honda Civic, Toyota Corolla or similar",
    },
    VehicleOption {
        class: VehicleClass::Comfort,
        label: "Comfort",
        price_from_eur: 250,
        description: "Toyota Camry, Mercedes Benz C class, BMW 2 Series Gran Tourer or similar",
    },
    VehicleOption {
        class: VehicleClass::Business,
        label: "Business",
        price_from_eur: 350,
        description: "Mercedes Benz E class, BMW 5 Series, Audi A6, Lexus ES",
    },
    VehicleOption {
        class: VehicleClass::Premium,
        label: "VIP",
        price_from_eur: 500,
        description: "Lexus 450",
    },
    VehicleOption {
        class: VehicleClass::Minivan,
        label: "Minivan",
        price_from_eur: 500,
        description: "Mercedes Benz V class",
    },
];

/// Find the display option for a vehicle class.
pub fn option_for(class: VehicleClass) -> &'static VehicleOption {
    FLEET
        .iter()
        .find(|o| o.class == class)
        .expect("every vehicle class has a fleet entry")
}
