use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status value the backend uses for institutions that are in service.
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// A medical institution as returned by `/api/medical-institutions`.
///
/// Apart from `id`, every field is opaque to the client: nothing is parsed
/// or checked beyond what the form requires to be present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInstitution {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub institution_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub institution_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub institution_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub representative_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub license_number: String,
    /// `null` after an update, since the payload never carries a status.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Reads a JSON `null` string column as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MedicalInstitution {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Body of a create or update request: the editable fields only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionPayload {
    pub institution_code: String,
    pub institution_name: String,
    pub institution_type: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub representative_name: String,
    pub license_number: String,
}

/// Choices offered by the form's type selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstitutionType {
    Hospital,
    Clinic,
    Pharmacy,
    DoctorsOffice,
}

impl InstitutionType {
    pub const ALL: [InstitutionType; 4] = [
        InstitutionType::Hospital,
        InstitutionType::Clinic,
        InstitutionType::Pharmacy,
        InstitutionType::DoctorsOffice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InstitutionType::Hospital => "Hospital",
            InstitutionType::Clinic => "Clinic",
            InstitutionType::Pharmacy => "Pharmacy",
            InstitutionType::DoctorsOffice => "Doctor's Office",
        }
    }
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InstitutionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "hospital" => Ok(InstitutionType::Hospital),
            "clinic" => Ok(InstitutionType::Clinic),
            "pharmacy" => Ok(InstitutionType::Pharmacy),
            "doctorsoffice" => Ok(InstitutionType::DoctorsOffice),
            _ => Err(format!(
                "unknown institution type '{s}' (expected one of: {})",
                InstitutionType::ALL
                    .iter()
                    .map(|t| t.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_record() {
        let record: MedicalInstitution = serde_json::from_value(serde_json::json!({
            "id": 1,
            "institutionCode": "H001",
            "institutionName": "Tokyo General",
            "institutionType": "Hospital",
            "address": "1-1 Chiyoda",
            "phone": null,
            "email": "info@tokyo-general.example",
            "representativeName": "Sato",
            "licenseNumber": "L-100",
            "status": "ACTIVE",
            "createdAt": "2024-01-15T09:00:00",
            "updatedAt": "2024-01-15T09:00:00",
            "version": 1
        }))
        .expect("decode");

        assert_eq!(record.id, 1);
        assert_eq!(record.institution_code, "H001");
        assert_eq!(record.phone, None);
        assert_eq!(record.email.as_deref(), Some("info@tokyo-general.example"));
        assert!(record.is_active());
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: MedicalInstitution = serde_json::from_value(serde_json::json!({
            "id": 7,
            "institutionCode": "C007",
            "institutionName": "Aoyama Clinic"
        }))
        .expect("decode");

        assert_eq!(record.email, None);
        assert_eq!(record.created_at, None);
        assert!(!record.is_active());
    }

    #[test]
    fn null_columns_decode_as_empty() {
        let records: Vec<MedicalInstitution> = serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "institutionCode": "H001",
                "institutionName": "Tokyo General",
                "status": "ACTIVE"
            },
            {
                "id": 2,
                "institutionCode": "C002",
                "institutionName": "Aoyama Clinic",
                "institutionType": null,
                "address": null,
                "representativeName": null,
                "licenseNumber": null,
                "status": null,
                "version": 2
            }
        ]))
        .expect("decode");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, "");
        assert_eq!(records[1].address, "");
        assert!(records[0].is_active());
        assert!(!records[1].is_active());
    }

    #[test]
    fn payload_uses_camel_case_and_omits_server_fields() {
        let payload = InstitutionPayload {
            institution_code: "H001".into(),
            representative_name: "Sato".into(),
            ..InstitutionPayload::default()
        };
        let json = serde_json::to_value(&payload).expect("encode");
        let obj = json.as_object().expect("object");

        assert_eq!(obj["institutionCode"], "H001");
        assert_eq!(obj["representativeName"], "Sato");
        assert_eq!(obj.len(), 8);
        for server_side in ["id", "status", "createdAt", "updatedAt", "version"] {
            assert!(!obj.contains_key(server_side), "{server_side}");
        }
    }

    #[test]
    fn institution_type_parses_labels_loosely() {
        assert_eq!("Doctor's Office".parse::<InstitutionType>(), Ok(InstitutionType::DoctorsOffice));
        assert_eq!("doctors-office".parse::<InstitutionType>(), Ok(InstitutionType::DoctorsOffice));
        assert_eq!("PHARMACY".parse::<InstitutionType>(), Ok(InstitutionType::Pharmacy));
        assert!("dentist".parse::<InstitutionType>().is_err());
    }
}
