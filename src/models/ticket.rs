//! Checkin ticket models for the MyRepairApp API.
//!
//! A checkin ticket is a repair/service order: identifiers, status, dates,
//! customer and assignee references, and nested collections of items,
//! devices, payments, notes, and activity records. The nested item and
//! activity collections are converted to typed objects once, eagerly, when
//! the ticket is built from service JSON.

use std::fmt;

use serde_json::Value;

use crate::error::WrenchError;
use crate::models::common::{
    enum_token, get_bool, get_f64, get_i64, get_str, get_value, parse_enum_field, RecordKind,
};
use crate::models::inventory::InventoryItem;

/// What a ticket activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    /// The ticket was created.
    Creation,
    /// The item list changed.
    ItemsChanged,
    /// The device list changed.
    DevicesChanged,
    /// The ticket status changed.
    StatusChange,
    /// The ticket was saved.
    Saved,
}

impl ActivityType {
    /// Parses a wire string, case-insensitively with spaces folded to
    /// underscores.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "CREATION" => Ok(ActivityType::Creation),
            "ITEMS_CHANGED" => Ok(ActivityType::ItemsChanged),
            "DEVICES_CHANGED" => Ok(ActivityType::DevicesChanged),
            "STATUS_CHANGE" => Ok(ActivityType::StatusChange),
            "SAVED" => Ok(ActivityType::Saved),
            _ => Err(WrenchError::invalid_enum(input, "activity type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Creation => "CREATION",
            ActivityType::ItemsChanged => "ITEMS_CHANGED",
            ActivityType::DevicesChanged => "DEVICES_CHANGED",
            ActivityType::StatusChange => "STATUS_CHANGE",
            ActivityType::Saved => "SAVED",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a ticket's activity log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckinTicketActivity {
    /// Unique activity ID.
    pub id: Option<String>,
    /// The ticket this activity belongs to (wire key `checkinTicketId`).
    pub checkin_ticket_id: Option<String>,
    /// The user who performed the activity (wire key `userId`).
    pub user_id: Option<String>,
    /// What happened.
    pub activity_type: Option<ActivityType>,
    /// Free-form metadata attached by the service.
    pub metadata: Option<Value>,
    /// When the activity happened (wire key `createdAt`).
    pub created_at: Option<String>,
}

impl CheckinTicketActivity {
    /// Builds an activity from a decoded service JSON object.
    pub fn from_wire(data: &Value) -> Result<Self, WrenchError> {
        let activity_type = parse_enum_field(data, "type", "activity type", ActivityType::parse)?;

        Ok(CheckinTicketActivity {
            id: get_str(data, "id"),
            checkin_ticket_id: get_str(data, "checkinTicketId"),
            user_id: get_str(data, "userId"),
            activity_type,
            metadata: get_value(data, "metadata"),
            created_at: get_str(data, "createdAt"),
        })
    }
}

impl fmt::Display for CheckinTicketActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.activity_type {
            Some(activity_type) => write!(f, "{}", activity_type),
            None => f.write_str("(unknown activity)"),
        }
    }
}

/// A MyRepairApp checkin ticket.
///
/// The `items` collection holds typed [`InventoryItem`] values converted
/// eagerly from the wire `checkinItems` array; an empty array becomes an
/// empty vector. Devices, payments, and notes are carried as raw JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckInTicket {
    /// Unique ticket ID.
    pub id: Option<String>,
    /// Owning organization (wire key `orgId`).
    pub org_id: Option<String>,
    /// Human-facing ticket number (wire key `ticketNumber`).
    pub ticket_number: Option<i64>,
    /// Whether the ticket is open.
    pub active: Option<bool>,
    /// Assigned technician (wire key `assigneeId`).
    pub assignee_id: Option<String>,
    /// Customer the ticket belongs to (wire key `customerId`).
    pub customer_id: Option<String>,
    /// Sort order within the queue.
    pub order: Option<i64>,
    /// Ticket type descriptor; the service sends a structured object.
    pub ticket_type: Option<Value>,
    /// Workflow status.
    pub status: Option<String>,
    /// When the ticket was closed (wire key `closedAt`).
    pub closed_at: Option<String>,
    /// End of the warranty period (wire key `warrantyPeriodEnd`).
    pub warranty_period_end: Option<String>,
    /// Whether this is a warranty job (wire key `isWarranty`).
    pub is_warranty: Option<bool>,
    /// Whether this is a return (wire key `isReturn`).
    pub is_return: Option<bool>,
    /// Price ceiling agreed with the customer (wire key `notToExceed`).
    pub not_to_exceed: Option<f64>,
    /// Appointment time (wire key `appointmentTime`).
    pub appointment_time: Option<String>,
    /// Whether the customer kept the device (wire key `customerPossession`).
    pub customer_possession: Option<bool>,
    /// Storage bin holding the device (wire key `storageBin`).
    pub storage_bin: Option<String>,
    /// Whether work is blocked on a part (wire key `waitingForPart`).
    pub waiting_for_part: Option<bool>,
    /// Shipping carrier.
    pub shipper: Option<String>,
    /// Shipment tracking number (wire key `trackingNumber`).
    pub tracking_number: Option<String>,
    /// ShipStation shipment reference (wire key `shipstationShipmentId`).
    pub shipstation_shipment_id: Option<String>,
    /// Shipping label URL (wire key `labelURL`).
    pub label_url: Option<String>,
    /// Repair provider for claim jobs (wire key `claimRepairProvider`).
    pub claim_repair_provider: Option<String>,
    /// Creation timestamp (wire key `createdAt`).
    pub created_at: Option<String>,
    /// Last-update timestamp (wire key `updatedAt`).
    pub updated_at: Option<String>,
    /// Assignee record as sent by the service.
    pub assignee: Option<Value>,
    /// Customer record as sent by the service.
    pub customer: Option<Value>,
    /// Typed inventory items attached to the ticket.
    pub items: Vec<InventoryItem>,
    /// Raw device records (wire key `checkinDevices`).
    pub devices: Vec<Value>,
    /// Raw payment records (wire key `checkinPayments`).
    pub payments: Vec<Value>,
    /// Raw note records (wire key `checkinNotes`).
    pub notes: Vec<Value>,
    /// Typed activity log, reconstructed in full at load time.
    pub activities: Vec<CheckinTicketActivity>,
    /// Protection plan records (wire key `myProtectionPlans`).
    pub protection_plans: Vec<Value>,
}

impl CheckInTicket {
    /// The record kind, used for update dispatch.
    pub fn kind(&self) -> RecordKind {
        RecordKind::CheckinTicket
    }

    /// Builds a ticket from a decoded service JSON object.
    ///
    /// Lookup is permissive: absent or null keys leave fields empty. The
    /// `checkinItems` array converts eagerly: each element carries its
    /// item under an `inventoryItem` key, and every element goes through
    /// [`InventoryItem::from_wire`], so an invalid item taxonomy anywhere
    /// in the ticket fails the whole conversion. Activities convert the
    /// same way via [`CheckinTicketActivity::from_wire`].
    pub fn from_wire(data: &Value) -> Result<Self, WrenchError> {
        let items = match data.get("checkinItems").and_then(Value::as_array) {
            None => Vec::new(),
            Some(entries) => entries
                .iter()
                .map(|entry| InventoryItem::from_wire(entry.get("inventoryItem").unwrap_or(entry)))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let activities = match data.get("checkinTicketActivities").and_then(Value::as_array) {
            None => Vec::new(),
            Some(entries) => entries
                .iter()
                .map(CheckinTicketActivity::from_wire)
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(CheckInTicket {
            id: get_str(data, "id"),
            org_id: get_str(data, "orgId"),
            ticket_number: get_i64(data, "ticketNumber"),
            active: get_bool(data, "active"),
            assignee_id: get_str(data, "assigneeId"),
            customer_id: get_str(data, "customerId"),
            order: get_i64(data, "order"),
            ticket_type: get_value(data, "type"),
            status: get_str(data, "status"),
            closed_at: get_str(data, "closedAt"),
            warranty_period_end: get_str(data, "warrantyPeriodEnd"),
            is_warranty: get_bool(data, "isWarranty"),
            is_return: get_bool(data, "isReturn"),
            not_to_exceed: get_f64(data, "notToExceed"),
            appointment_time: get_str(data, "appointmentTime"),
            customer_possession: get_bool(data, "customerPossession"),
            storage_bin: get_str(data, "storageBin"),
            waiting_for_part: get_bool(data, "waitingForPart"),
            shipper: get_str(data, "shipper"),
            tracking_number: get_str(data, "trackingNumber"),
            shipstation_shipment_id: get_str(data, "shipstationShipmentId"),
            label_url: get_str(data, "labelURL"),
            claim_repair_provider: get_str(data, "claimRepairProvider"),
            created_at: get_str(data, "createdAt"),
            updated_at: get_str(data, "updatedAt"),
            assignee: get_value(data, "assignee"),
            customer: get_value(data, "customer"),
            items,
            devices: get_array(data, "checkinDevices"),
            payments: get_array(data, "checkinPayments"),
            notes: get_array(data, "checkinNotes"),
            activities,
            protection_plans: get_array(data, "myProtectionPlans"),
        })
    }

    /// Returns the status or a placeholder.
    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or("Unknown")
    }
}

impl fmt::Display for CheckInTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ticket_number {
            Some(number) => write!(f, "#{} ({})", number, self.display_status()),
            None => write!(f, "({})", self.display_status()),
        }
    }
}

/// Reads an optional array field, defaulting to empty.
fn get_array(data: &Value, key: &str) -> Vec<Value> {
    data.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
