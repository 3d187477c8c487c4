//! Inventory item models for the MyRepairApp API.
//!
//! This module defines `InventoryItem` and its category/type taxonomy.
//! Items carry a [`Category`] plus a category-specific subtype, and the
//! two travel together on the wire as a single `type` string in
//! `"Category - Subtype"` form. Parsing that string is strict: an unknown
//! category prefix or subtype is a validation fault, never a silent
//! default.

use std::fmt;

use serde_json::{json, Value};

use crate::error::WrenchError;
use crate::models::common::{
    enum_token, get_bool, get_f64, get_i64, get_str, get_value, parse_enum_field, RecordKind,
};

/// Physical condition of an inventory item.
///
/// - `New`: brand new, such as from a direct wholesaler.
/// - `Used`: slight damage or visible markings from prior ownership.
/// - `Refurbished`: previously damaged or inoperable, restored with
///   replacement parts.
/// - `Damaged`: inoperable, extensively damaged, or improperly repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Brand new.
    New,
    /// Previously owned.
    Used,
    /// Restored to working order.
    Refurbished,
    /// Inoperable or badly damaged.
    Damaged,
}

impl Condition {
    /// Parses a wire string, case-insensitively with spaces folded to
    /// underscores.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "NEW" => Ok(Condition::New),
            "USED" => Ok(Condition::Used),
            "REFURBISHED" => Ok(Condition::Refurbished),
            "DAMAGED" => Ok(Condition::Damaged),
            _ => Err(WrenchError::invalid_enum(input, "condition")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::Refurbished => "Refurbished",
            Condition::Damaged => "Damaged",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level item category.
///
/// Every category except `Tool` pairs with its own subtype enum; `Tool`
/// stands alone and renders as the bare `"Tools"` sentinel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Used for a device repair. See [`PartType`].
    Part,
    /// A device repair in itself. See [`RepairType`].
    Repair,
    /// A prepaid service on a device. See [`PrepaidType`].
    Prepaid,
    /// A device sold by the shop. See [`DeviceType`].
    Device,
    /// An accessory such as a charging cable or case. See [`AccessoryType`].
    Accessory,
    /// An additional service not covered by the other groups. See
    /// [`ServiceType`].
    Service,
    /// Shop tooling.
    Tool,
}

impl Category {
    /// Parses a wire string, case-insensitively with spaces folded to
    /// underscores.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "PART" => Ok(Category::Part),
            "REPAIR" => Ok(Category::Repair),
            "PREPAID" => Ok(Category::Prepaid),
            "DEVICE" => Ok(Category::Device),
            "ACCESSORY" => Ok(Category::Accessory),
            "SERVICE" => Ok(Category::Service),
            "TOOL" => Ok(Category::Tool),
            _ => Err(WrenchError::invalid_enum(input, "category")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Part => "Part",
            Category::Repair => "Repair",
            Category::Prepaid => "Prepaid",
            Category::Device => "Device",
            Category::Accessory => "Accessory",
            Category::Service => "Service",
            Category::Tool => "Tool",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device class a repair is performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairType {
    /// Cellphone repair.
    Phone,
    /// Tablet repair (no built-in keyboard, mobile OS).
    Tablet,
    /// Laptop repair.
    Laptop,
    /// Desktop or handheld computer repair; mobile-OS handhelds are `Game`.
    Computer,
    /// Game console or gaming handheld; desktop-OS consoles are `Computer`.
    Game,
    /// Drone repair.
    Drone,
    /// Devices outside the main classes that still count as devices,
    /// like cameras.
    Miscellaneous,
    /// Anything else.
    Other,
}

impl RepairType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "PHONE" => Ok(RepairType::Phone),
            "TABLET" => Ok(RepairType::Tablet),
            "LAPTOP" => Ok(RepairType::Laptop),
            "COMPUTER" => Ok(RepairType::Computer),
            "GAME" => Ok(RepairType::Game),
            "DRONE" => Ok(RepairType::Drone),
            "MISCELLANEOUS" => Ok(RepairType::Miscellaneous),
            "OTHER" => Ok(RepairType::Other),
            _ => Err(WrenchError::invalid_enum(input, "repair type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairType::Phone => "Phone",
            RepairType::Tablet => "Tablet",
            RepairType::Laptop => "Laptop",
            RepairType::Computer => "Computer",
            RepairType::Game => "Game",
            RepairType::Drone => "Drone",
            RepairType::Miscellaneous => "Miscellaneous",
            RepairType::Other => "Other",
        }
    }
}

/// Device class a part belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartType {
    /// Cellphone part.
    Phone,
    /// Tablet part.
    Tablet,
    /// Laptop part.
    Laptop,
    /// Desktop or handheld computer part.
    Computer,
    /// Game console part.
    Game,
    /// Drone part.
    Drone,
    /// Hard to source; doesn't fit the other classes.
    SpecialOrder,
    /// Anything else.
    Other,
}

impl PartType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "PHONE" => Ok(PartType::Phone),
            "TABLET" => Ok(PartType::Tablet),
            "LAPTOP" => Ok(PartType::Laptop),
            "COMPUTER" => Ok(PartType::Computer),
            "GAME" => Ok(PartType::Game),
            "DRONE" => Ok(PartType::Drone),
            "SPECIAL_ORDER" => Ok(PartType::SpecialOrder),
            "OTHER" => Ok(PartType::Other),
            _ => Err(WrenchError::invalid_enum(input, "part type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Phone => "Phone",
            PartType::Tablet => "Tablet",
            PartType::Laptop => "Laptop",
            PartType::Computer => "Computer",
            PartType::Game => "Game",
            PartType::Drone => "Drone",
            PartType::SpecialOrder => "Special Order",
            PartType::Other => "Other",
        }
    }
}

/// Kind of standalone service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// Carrier unlock.
    Unlock,
    /// Insurance claim or warranty repair.
    Claim,
    /// Anything else.
    Other,
}

impl ServiceType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "UNLOCK" => Ok(ServiceType::Unlock),
            "CLAIM" => Ok(ServiceType::Claim),
            "OTHER" => Ok(ServiceType::Other),
            _ => Err(WrenchError::invalid_enum(input, "service type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Unlock => "Unlock",
            ServiceType::Claim => "Claim",
            ServiceType::Other => "Other",
        }
    }
}

/// Kind of device accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryType {
    /// Headphones, speakers.
    Audio,
    /// Protective case.
    Case,
    /// Screen protector.
    ScreenProtector,
    /// Chargers, cables, batteries.
    Power,
    /// Anything else.
    Other,
}

impl AccessoryType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "AUDIO" => Ok(AccessoryType::Audio),
            "CASE" => Ok(AccessoryType::Case),
            "SCREEN_PROTECTOR" => Ok(AccessoryType::ScreenProtector),
            "POWER" => Ok(AccessoryType::Power),
            "OTHER" => Ok(AccessoryType::Other),
            _ => Err(WrenchError::invalid_enum(input, "accessory type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessoryType::Audio => "Audio",
            AccessoryType::Case => "Case",
            AccessoryType::ScreenProtector => "Screen Protector",
            AccessoryType::Power => "Power",
            AccessoryType::Other => "Other",
        }
    }
}

/// Kind of prepaid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepaidType {
    /// Device activated with a plan.
    Activation,
    /// Plan provided.
    Plan,
    /// SIM card and plan provided.
    Sim,
    /// Anything else.
    Other,
}

impl PrepaidType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "ACTIVATION" => Ok(PrepaidType::Activation),
            "PLAN" => Ok(PrepaidType::Plan),
            "SIM" => Ok(PrepaidType::Sim),
            "OTHER" => Ok(PrepaidType::Other),
            _ => Err(WrenchError::invalid_enum(input, "prepaid type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepaidType::Activation => "Activation",
            PrepaidType::Plan => "Plan",
            PrepaidType::Sim => "SIM",
            PrepaidType::Other => "Other",
        }
    }
}

/// Class of device sold by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// Cellphone.
    Phone,
    /// Tablet; lacks a built-in keyboard.
    Tablet,
    /// Laptop computer.
    Laptop,
    /// Desktop or handheld computer.
    Computer,
    /// Game console or gaming handheld.
    Game,
    /// Drone.
    Drone,
    /// Anything else.
    Other,
}

impl DeviceType {
    /// Parses a wire subtype string.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        match enum_token(input).as_str() {
            "PHONE" => Ok(DeviceType::Phone),
            "TABLET" => Ok(DeviceType::Tablet),
            "LAPTOP" => Ok(DeviceType::Laptop),
            "COMPUTER" => Ok(DeviceType::Computer),
            "GAME" => Ok(DeviceType::Game),
            "DRONE" => Ok(DeviceType::Drone),
            "OTHER" => Ok(DeviceType::Other),
            _ => Err(WrenchError::invalid_enum(input, "device type")),
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Phone => "Phone",
            DeviceType::Tablet => "Tablet",
            DeviceType::Laptop => "Laptop",
            DeviceType::Computer => "Computer",
            DeviceType::Game => "Game",
            DeviceType::Drone => "Drone",
            DeviceType::Other => "Other",
        }
    }
}

/// The polymorphic item type: a category paired with its subtype.
///
/// Wire form is `"Category - Subtype"` split on the first hyphen, except
/// the bare `"Tools"` sentinel which maps to [`ItemType::Tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// A repair line, typed by the device being repaired.
    Repair(RepairType),
    /// A part, typed by the device it belongs in.
    Part(PartType),
    /// A prepaid action.
    Prepaid(PrepaidType),
    /// A device for sale.
    Device(DeviceType),
    /// An accessory.
    Accessory(AccessoryType),
    /// A standalone service.
    Service(ServiceType),
    /// Shop tooling; the single type of the `Tool` category.
    Tool,
}

impl ItemType {
    /// Parses a wire type string.
    ///
    /// The string is split on the first hyphen into a category prefix and
    /// a subtype; the prefix selects which subtype enum resolves the rest.
    /// A string with no hyphen is valid only for the literal `"TOOLS"`
    /// sentinel.
    ///
    /// # Errors
    ///
    /// Returns `WrenchError::InvalidEnum` naming the offending input when
    /// the prefix is not a known category or the subtype is not a member
    /// of that category's enum.
    pub fn parse(input: &str) -> Result<Self, WrenchError> {
        let trimmed = input.trim();
        let Some((prefix, subtype)) = trimmed.split_once('-') else {
            if enum_token(trimmed) == "TOOLS" {
                return Ok(ItemType::Tool);
            }
            return Err(WrenchError::invalid_enum(input, "item type"));
        };

        let subtype = subtype.trim();
        match enum_token(prefix).as_str() {
            "REPAIR" => RepairType::parse(subtype).map(ItemType::Repair),
            "DEVICE" => DeviceType::parse(subtype).map(ItemType::Device),
            "PREPAID" => PrepaidType::parse(subtype).map(ItemType::Prepaid),
            "PART" => PartType::parse(subtype).map(ItemType::Part),
            "ACCESSORY" => AccessoryType::parse(subtype).map(ItemType::Accessory),
            "SERVICE" => ServiceType::parse(subtype).map(ItemType::Service),
            _ => Err(WrenchError::invalid_enum(
                prefix.trim(),
                "item type category",
            )),
        }
    }

    /// The category this type belongs to.
    pub fn category(&self) -> Category {
        match self {
            ItemType::Repair(_) => Category::Repair,
            ItemType::Part(_) => Category::Part,
            ItemType::Prepaid(_) => Category::Prepaid,
            ItemType::Device(_) => Category::Device,
            ItemType::Accessory(_) => Category::Accessory,
            ItemType::Service(_) => Category::Service,
            ItemType::Tool => Category::Tool,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Repair(t) => write!(f, "Repair - {}", t.as_str()),
            ItemType::Part(t) => write!(f, "Part - {}", t.as_str()),
            ItemType::Prepaid(t) => write!(f, "Prepaid - {}", t.as_str()),
            ItemType::Device(t) => write!(f, "Device - {}", t.as_str()),
            ItemType::Accessory(t) => write!(f, "Accessory - {}", t.as_str()),
            ItemType::Service(t) => write!(f, "Service - {}", t.as_str()),
            ItemType::Tool => f.write_str("Tools"),
        }
    }
}

/// A MyRepairApp inventory item.
///
/// Covers stocked units and service lines alike: organization, inventory
/// counts, price, cost, trade-in linkage, and a pile of workflow flags.
/// All fields are optional; the service omits whatever a record doesn't
/// carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItem {
    /// Unique item ID (wire key `id`).
    pub item_id: Option<String>,
    /// Owning store (wire key `storeId`).
    pub store_id: Option<String>,
    /// Stock-keeping unit code.
    pub sku: Option<String>,
    /// Manufacturer name.
    pub manufacturer: Option<String>,
    /// Category-specific item type.
    pub item_type: Option<ItemType>,
    /// Display name.
    pub name: Option<String>,
    /// Units in stock (wire key `instock`).
    pub in_stock: Option<i64>,
    /// Physical condition.
    pub condition: Option<Condition>,
    /// Bin location within the store.
    pub bin: Option<String>,
    /// Supplier reference (wire key `supplierId`).
    pub supplier_id: Option<String>,
    /// Sale price.
    pub price: Option<f64>,
    /// Creation timestamp, as sent by the service.
    pub created_at: Option<String>,
    /// Last-update timestamp, as sent by the service.
    pub updated_at: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
    /// Whether the item has been counted in a physical inventory.
    pub inventoried: Option<bool>,
    /// Whether units are tracked by serial number.
    pub serialized: Option<bool>,
    /// Whether the item is active.
    pub active: Option<bool>,
    /// Acquisition cost.
    pub cost: Option<f64>,
    /// Top-level category.
    pub category: Option<Category>,
    /// Serial number (wire key `serialNum`).
    pub serial_num: Option<String>,
    /// Carrier, for carrier-locked devices.
    pub carrier: Option<String>,
    /// Color.
    pub color: Option<String>,
    /// Storage capacity.
    pub storage: Option<String>,
    /// Condition of the traded-in device (wire key `tradeInCondition`).
    pub trade_in_condition: Option<Condition>,
    /// The traded-in device itself (wire key `tradeInDevice`).
    pub trade_in_device: Option<Box<InventoryItem>>,
    /// Trade-in workflow status (wire key `tradeInStatus`).
    pub trade_in_status: Option<Value>,
    /// Additional info blob (wire key `additionalInfo`).
    pub additional_info: Option<Value>,
    /// Whether the item is a rebate line (wire key `isRebate`).
    pub is_rebate: Option<bool>,
    /// Whether the item is tax free (wire key `taxFree`).
    pub tax_free: Option<bool>,
    /// Grouping reference (wire key `groupingId`).
    pub grouping_id: Option<String>,
    /// Repair provider (wire key `repairProvider`).
    pub repair_provider: Option<String>,
    /// Motorola-authorized-repair-center flag (wire key `isMotorolaSku`).
    pub is_motorola_sku: Option<bool>,
    /// Pulled from stock.
    pub pulled: Option<bool>,
    /// On order.
    pub ordered: Option<bool>,
    /// Back ordered (wire key `backOrdered`).
    pub back_ordered: Option<bool>,
    /// SKU pulled (wire key `skuPulled`).
    pub sku_pulled: Option<bool>,
    /// SKU in stock (wire key `skuInstock`).
    pub sku_instock: Option<bool>,
}

impl InventoryItem {
    /// The record kind, used for update dispatch.
    pub fn kind(&self) -> RecordKind {
        RecordKind::Inventory
    }

    /// Builds an item from a decoded service JSON object.
    ///
    /// Lookup is permissive: absent or null keys leave the field empty.
    /// The `condition`, `category`, `type`, and `tradeInCondition` enums
    /// are the exception - a present string that matches no member fails
    /// the whole conversion, so a partially-converted item is never
    /// returned.
    pub fn from_wire(data: &Value) -> Result<Self, WrenchError> {
        let condition = parse_enum_field(data, "condition", "condition", Condition::parse)?;
        let category = parse_enum_field(data, "category", "category", Category::parse)?;
        let item_type = parse_enum_field(data, "type", "item type", ItemType::parse)?;
        let trade_in_condition =
            parse_enum_field(data, "tradeInCondition", "condition", Condition::parse)?;

        let trade_in_device = match data.get("tradeInDevice") {
            None | Some(Value::Null) => None,
            Some(nested) => Some(Box::new(InventoryItem::from_wire(nested)?)),
        };

        Ok(InventoryItem {
            item_id: get_str(data, "id"),
            store_id: get_str(data, "storeId"),
            sku: get_str(data, "sku"),
            manufacturer: get_str(data, "manufacturer"),
            item_type,
            name: get_str(data, "name"),
            in_stock: get_i64(data, "instock"),
            condition,
            bin: get_str(data, "bin"),
            supplier_id: get_str(data, "supplierId"),
            price: get_f64(data, "price"),
            created_at: get_str(data, "createdAt"),
            updated_at: get_str(data, "updatedAt"),
            note: get_str(data, "note"),
            inventoried: get_bool(data, "inventoried"),
            serialized: get_bool(data, "serialized"),
            active: get_bool(data, "active"),
            cost: get_f64(data, "cost"),
            category,
            serial_num: get_str(data, "serialNum"),
            carrier: get_str(data, "carrier"),
            color: get_str(data, "color"),
            storage: get_str(data, "storage"),
            trade_in_condition,
            trade_in_device,
            trade_in_status: get_value(data, "tradeInStatus"),
            additional_info: get_value(data, "additionalInfo"),
            is_rebate: get_bool(data, "isRebate"),
            tax_free: get_bool(data, "taxFree"),
            grouping_id: get_str(data, "groupingId"),
            repair_provider: get_str(data, "repairProvider"),
            is_motorola_sku: get_bool(data, "isMotorolaSku"),
            pulled: get_bool(data, "pulled"),
            ordered: get_bool(data, "ordered"),
            back_ordered: get_bool(data, "backOrdered"),
            sku_pulled: get_bool(data, "skuPulled"),
            sku_instock: get_bool(data, "skuInstock"),
        })
    }

    /// Exports the item as a wire-schema JSON object.
    ///
    /// Enum members flatten to their wire strings, the nested trade-in
    /// device flattens recursively, and two renames apply to match the
    /// wire schema: `item_id` becomes `id` and `store_id` becomes
    /// `storeId`. Every field is present (null when unset) so the export
    /// doubles as the key universe for PATCH filtering.
    pub fn to_wire(&self) -> serde_json::Map<String, Value> {
        let mut out = serde_json::Map::new();

        out.insert("id".into(), json!(self.item_id));
        out.insert("storeId".into(), json!(self.store_id));
        out.insert("sku".into(), json!(self.sku));
        out.insert("manufacturer".into(), json!(self.manufacturer));
        out.insert(
            "type".into(),
            json!(self.item_type.as_ref().map(ItemType::to_string)),
        );
        out.insert("name".into(), json!(self.name));
        out.insert("in_stock".into(), json!(self.in_stock));
        out.insert(
            "condition".into(),
            json!(self.condition.as_ref().map(Condition::as_str)),
        );
        out.insert("bin".into(), json!(self.bin));
        out.insert("supplier_id".into(), json!(self.supplier_id));
        out.insert("price".into(), json!(self.price));
        out.insert("created_at".into(), json!(self.created_at));
        out.insert("updated_at".into(), json!(self.updated_at));
        out.insert("note".into(), json!(self.note));
        out.insert("inventoried".into(), json!(self.inventoried));
        out.insert("serialized".into(), json!(self.serialized));
        out.insert("active".into(), json!(self.active));
        out.insert("cost".into(), json!(self.cost));
        out.insert(
            "category".into(),
            json!(self.category.as_ref().map(Category::as_str)),
        );
        out.insert("serial_num".into(), json!(self.serial_num));
        out.insert("carrier".into(), json!(self.carrier));
        out.insert("color".into(), json!(self.color));
        out.insert("storage".into(), json!(self.storage));
        out.insert(
            "trade_in_condition".into(),
            json!(self.trade_in_condition.as_ref().map(Condition::as_str)),
        );
        out.insert(
            "trade_in_device".into(),
            match &self.trade_in_device {
                Some(device) => Value::Object(device.to_wire()),
                None => Value::Null,
            },
        );
        out.insert(
            "trade_in_status".into(),
            self.trade_in_status.clone().unwrap_or(Value::Null),
        );
        out.insert(
            "additional_info".into(),
            self.additional_info.clone().unwrap_or(Value::Null),
        );
        out.insert("is_rebate".into(), json!(self.is_rebate));
        out.insert("tax_free".into(), json!(self.tax_free));
        out.insert("grouping_id".into(), json!(self.grouping_id));
        out.insert("repair_provider".into(), json!(self.repair_provider));
        out.insert("is_motorola_sku".into(), json!(self.is_motorola_sku));
        out.insert("pulled".into(), json!(self.pulled));
        out.insert("ordered".into(), json!(self.ordered));
        out.insert("back_ordered".into(), json!(self.back_ordered));
        out.insert("sku_pulled".into(), json!(self.sku_pulled));
        out.insert("sku_instock".into(), json!(self.sku_instock));

        out
    }

    /// Returns the display name or a placeholder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed item)")
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn all_item_types() -> Vec<ItemType> {
        let mut all = vec![ItemType::Tool];
        all.extend(
            [
                RepairType::Phone,
                RepairType::Tablet,
                RepairType::Laptop,
                RepairType::Computer,
                RepairType::Game,
                RepairType::Drone,
                RepairType::Miscellaneous,
                RepairType::Other,
            ]
            .map(ItemType::Repair),
        );
        all.extend(
            [
                PartType::Phone,
                PartType::Tablet,
                PartType::Laptop,
                PartType::Computer,
                PartType::Game,
                PartType::Drone,
                PartType::SpecialOrder,
                PartType::Other,
            ]
            .map(ItemType::Part),
        );
        all.extend(
            [
                PrepaidType::Activation,
                PrepaidType::Plan,
                PrepaidType::Sim,
                PrepaidType::Other,
            ]
            .map(ItemType::Prepaid),
        );
        all.extend(
            [
                DeviceType::Phone,
                DeviceType::Tablet,
                DeviceType::Laptop,
                DeviceType::Computer,
                DeviceType::Game,
                DeviceType::Drone,
                DeviceType::Other,
            ]
            .map(ItemType::Device),
        );
        all.extend(
            [
                AccessoryType::Audio,
                AccessoryType::Case,
                AccessoryType::ScreenProtector,
                AccessoryType::Power,
                AccessoryType::Other,
            ]
            .map(ItemType::Accessory),
        );
        all.extend(
            [ServiceType::Unlock, ServiceType::Claim, ServiceType::Other].map(ItemType::Service),
        );
        all
    }

    #[test]
    fn test_item_type_round_trips_for_all_pairs() {
        for item_type in all_item_types() {
            let wire = item_type.to_string();
            let parsed = ItemType::parse(&wire).unwrap();
            assert_eq!(parsed, item_type, "round trip failed for {}", wire);
        }
    }

    #[test]
    fn test_item_type_parse_is_case_insensitive() {
        assert_eq!(
            ItemType::parse("repair - phone").unwrap(),
            ItemType::Repair(RepairType::Phone)
        );
        assert_eq!(
            ItemType::parse("PART - SPECIAL ORDER").unwrap(),
            ItemType::Part(PartType::SpecialOrder)
        );
        assert_eq!(
            ItemType::parse("Accessory - screen protector").unwrap(),
            ItemType::Accessory(AccessoryType::ScreenProtector)
        );
    }

    #[test]
    fn test_tools_sentinel_maps_to_tool() {
        assert_eq!(ItemType::parse("TOOLS").unwrap(), ItemType::Tool);
        assert_eq!(ItemType::parse("tools").unwrap(), ItemType::Tool);
        assert_eq!(ItemType::Tool.to_string(), "Tools");
    }

    #[test]
    fn test_item_type_rejects_missing_hyphen() {
        let err = ItemType::parse("Phone Screen").unwrap_err();
        assert!(err.to_string().contains("Phone Screen"));
        assert!(err.to_string().contains("item type"));
    }

    #[test]
    fn test_item_type_rejects_unknown_category_prefix() {
        let err = ItemType::parse("Phone - Screen").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"Phone\" is not a valid item type category"
        );
    }

    #[test]
    fn test_item_type_rejects_unknown_subtype() {
        let err = ItemType::parse("Part - Screen").unwrap_err();
        assert_eq!(err.to_string(), "\"Screen\" is not a valid part type");
    }

    #[test]
    fn test_item_type_splits_on_first_hyphen_only() {
        let err = ItemType::parse("Part - Special - Order").unwrap_err();
        assert!(err.to_string().contains("Special - Order"));
    }

    #[test]
    fn test_condition_parse_and_reject() {
        assert_eq!(Condition::parse("new").unwrap(), Condition::New);
        assert_eq!(
            Condition::parse("Refurbished").unwrap(),
            Condition::Refurbished
        );
        let err = Condition::parse("Mint").unwrap_err();
        assert_eq!(err.to_string(), "\"Mint\" is not a valid condition");
    }

    #[test]
    fn test_category_parse_and_reject() {
        assert_eq!(Category::parse("part").unwrap(), Category::Part);
        assert_eq!(Category::parse("TOOL").unwrap(), Category::Tool);
        assert!(Category::parse("Gadget").is_err());
    }

    #[test]
    fn test_from_wire_full_item() {
        let data = json!({
            "id": "itm_1",
            "storeId": "st_9",
            "sku": "SCR-IP13",
            "manufacturer": "Apple",
            "type": "Part - Phone",
            "name": "iPhone 13 screen",
            "instock": 4,
            "condition": "New",
            "bin": "A3",
            "supplierId": "sup_2",
            "price": 89.99,
            "createdAt": "2024-11-02T10:00:00Z",
            "updatedAt": "2024-11-03T10:00:00Z",
            "inventoried": true,
            "serialized": false,
            "active": true,
            "cost": 41.5,
            "category": "Part",
            "isRebate": false,
            "taxFree": false,
            "pulled": false,
            "ordered": true,
            "backOrdered": false,
            "skuPulled": false,
            "skuInstock": true
        });

        let item = InventoryItem::from_wire(&data).unwrap();
        assert_eq!(item.item_id.as_deref(), Some("itm_1"));
        assert_eq!(item.store_id.as_deref(), Some("st_9"));
        assert_eq!(item.item_type, Some(ItemType::Part(PartType::Phone)));
        assert_eq!(item.category, Some(Category::Part));
        assert_eq!(item.condition, Some(Condition::New));
        assert_eq!(item.in_stock, Some(4));
        assert_eq!(item.price, Some(89.99));
        assert_eq!(item.ordered, Some(true));
        assert_eq!(item.kind(), RecordKind::Inventory);
        assert_eq!(item.to_string(), "iPhone 13 screen");
    }

    #[test]
    fn test_from_wire_missing_keys_are_none() {
        let item = InventoryItem::from_wire(&json!({"id": "itm_2"})).unwrap();
        assert_eq!(item.item_id.as_deref(), Some("itm_2"));
        assert_eq!(item.name, None);
        assert_eq!(item.condition, None);
        assert_eq!(item.item_type, None);
        assert_eq!(item.display_name(), "(unnamed item)");
    }

    #[test]
    fn test_from_wire_invalid_condition_fails_whole_conversion() {
        let data = json!({"id": "itm_3", "condition": "Mint"});
        let err = InventoryItem::from_wire(&data).unwrap_err();
        assert_eq!(err.to_string(), "\"Mint\" is not a valid condition");
    }

    #[test]
    fn test_from_wire_part_screen_raises_validation_fault() {
        // "Screen" is not a PartType member; the item must never come back
        // partially converted.
        let data = json!({
            "id": "1",
            "category": "Part",
            "type": "Part - Screen",
            "name": "iPhone screen"
        });
        let err = InventoryItem::from_wire(&data).unwrap_err();
        assert_eq!(err.to_string(), "\"Screen\" is not a valid part type");
    }

    #[test]
    fn test_from_wire_parses_trade_in_fields() {
        let data = json!({
            "id": "itm_4",
            "tradeInCondition": "Used",
            "tradeInDevice": {"id": "itm_5", "name": "Old phone", "condition": "Damaged"}
        });
        let item = InventoryItem::from_wire(&data).unwrap();
        assert_eq!(item.trade_in_condition, Some(Condition::Used));
        let device = item.trade_in_device.unwrap();
        assert_eq!(device.item_id.as_deref(), Some("itm_5"));
        assert_eq!(device.condition, Some(Condition::Damaged));
    }

    #[test]
    fn test_to_wire_applies_renames_and_flattens_enums() {
        let item = InventoryItem {
            item_id: Some("itm_1".into()),
            store_id: Some("st_9".into()),
            item_type: Some(ItemType::Repair(RepairType::Phone)),
            condition: Some(Condition::Refurbished),
            category: Some(Category::Repair),
            name: Some("Screen swap".into()),
            ..Default::default()
        };

        let wire = item.to_wire();
        assert_eq!(wire.get("id"), Some(&json!("itm_1")));
        assert_eq!(wire.get("storeId"), Some(&json!("st_9")));
        assert!(!wire.contains_key("item_id"));
        assert!(!wire.contains_key("store_id"));
        assert_eq!(wire.get("type"), Some(&json!("Repair - Phone")));
        assert_eq!(wire.get("condition"), Some(&json!("Refurbished")));
        assert_eq!(wire.get("category"), Some(&json!("Repair")));
    }

    #[test]
    fn test_to_wire_contains_no_kind_discriminator() {
        let wire = InventoryItem::default().to_wire();
        for key in ["kind", "record_kind", "item_kind", "ITEM_TYPE"] {
            assert!(!wire.contains_key(key), "unexpected key {}", key);
        }
    }

    #[test]
    fn test_to_wire_flattens_nested_trade_in_device() {
        let item = InventoryItem {
            item_id: Some("itm_1".into()),
            trade_in_device: Some(Box::new(InventoryItem {
                item_id: Some("itm_5".into()),
                condition: Some(Condition::Damaged),
                ..Default::default()
            })),
            ..Default::default()
        };

        let wire = item.to_wire();
        let nested = wire.get("trade_in_device").unwrap().as_object().unwrap();
        assert_eq!(nested.get("id"), Some(&json!("itm_5")));
        assert_eq!(nested.get("condition"), Some(&json!("Damaged")));
    }

    #[test]
    fn test_to_wire_keeps_unset_fields_as_null() {
        let wire = InventoryItem::default().to_wire();
        assert_eq!(wire.get("sku"), Some(&json!(null)));
        assert_eq!(wire.get("price"), Some(&json!(null)));
        // The full key universe is what PATCH filtering matches against.
        assert!(wire.contains_key("sku_instock"));
        assert!(wire.contains_key("back_ordered"));
    }
}
