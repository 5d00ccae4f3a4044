//! Services offered on the contact form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceType {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SERVICE_TYPES: &[ServiceType] = &[
    ServiceType { id: "commercial", name: "Commercial Construction" },
    ServiceType { id: "roofing", name: "Roofing" },
    ServiceType { id: "residential", name: "Residential & DIY" },
    ServiceType { id: "landscaping", name: "Yard & Landscaping" },
    ServiceType { id: "demolition", name: "Demolition" },
];

pub fn service_type(id: &str) -> Option<&'static ServiceType> {
    SERVICE_TYPES.iter().find(|s| s.id == id)
}

/// Display label for a submitted service value. Unknown values are free text
/// and come back unchanged.
pub fn service_label(value: &str) -> &str {
    service_type(value).map_or(value, |s| s.name)
}
