//! Records shared by the integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use elevator_console::model::{
    Customer, DriveType, Equipment, EquipmentStatus, OrderDraft, OrderStatus, OrderType,
    PartReservation, ServiceOrder, StockItem, TechnicalSpecs, Technician,
};

pub fn customer(id: &str, name: &str) -> Customer {
    Customer {
        id: id.into(),
        name: name.into(),
        document: "12.345.678/0001-90".into(),
        address: format!("Rua das Flores, {id}, São Paulo"),
        contact_name: "Marta Souza".into(),
        phone: "(11) 98765-4321".into(),
        email: "sindico@example.com".into(),
        active: true,
        created_at: None,
        lat: None,
        lng: None,
    }
}

pub fn equipment(id: &str, customer_id: &str) -> Equipment {
    Equipment {
        id: id.into(),
        customer_id: customer_id.into(),
        name: format!("Elevador {id}"),
        position: Some("Torre A".into()),
        brand: "Atlas".into(),
        model: "Gen2".into(),
        serial_number: format!("SN-{id}"),
        manufacture_year: Some(2015),
        technical_specs: TechnicalSpecs {
            stops: 12,
            capacity_kg: 630,
            capacity_persons: 8,
            speed: Some(1.0),
            drive_type: DriveType::Gearless,
            control_panel: None,
        },
        status: EquipmentStatus::Operational,
        last_preventive_date: None,
        next_preventive_date: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn technician(id: &str, name: &str) -> Technician {
    Technician {
        id: id.into(),
        name: name.into(),
        email: format!("{id}@example.com"),
        phone: "11987654321".into(),
        specialty: "Mecânica".into(),
        is_active: true,
    }
}

pub fn stock_item(id: &str, name: &str, quantity: u32) -> StockItem {
    StockItem {
        id: id.into(),
        code: format!("P-{id}").to_uppercase(),
        name: name.into(),
        description: None,
        category: "Tração".into(),
        current_quantity: quantity,
        min_quantity: 2,
        unit: "un".into(),
        cost_price: 150.0,
        supplier: None,
        location: None,
        updated_at: None,
    }
}

/// An order already known to the server.
pub fn order(id: &str, number: &str, status: OrderStatus, equipment_id: &str) -> ServiceOrder {
    ServiceOrder {
        id: id.into(),
        order_number: number.into(),
        customer_id: "c1".into(),
        equipment_id: equipment_id.into(),
        technician_id: Some("t1".into()),
        kind: OrderType::Corrective,
        status,
        is_emergency: false,
        description: "Porta do pavimento 3 não fecha".into(),
        parts: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        updated_at: None,
        updated_by: "admin".into(),
        customer_signature: None,
    }
}

pub fn draft(parts: Vec<PartReservation>) -> OrderDraft {
    OrderDraft {
        customer_id: Some("c1".into()),
        equipment_id: Some("e1".into()),
        technician_id: Some("t1".into()),
        kind: Some(OrderType::Corrective),
        description: "Troca do cabo de tração do elevador social".into(),
        parts,
        ..Default::default()
    }
}
