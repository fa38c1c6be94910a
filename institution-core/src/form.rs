//! The create/edit form draft

use crate::dto::{InstitutionPayload, MedicalInstitution};

/// Editable fields, in the order the form shows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    InstitutionCode,
    InstitutionName,
    InstitutionType,
    Address,
    Phone,
    Email,
    RepresentativeName,
    LicenseNumber,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::InstitutionCode,
        FormField::InstitutionName,
        FormField::InstitutionType,
        FormField::Address,
        FormField::Phone,
        FormField::Email,
        FormField::RepresentativeName,
        FormField::LicenseNumber,
    ];

    /// Wire name, also used as the input's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            FormField::InstitutionCode => "institutionCode",
            FormField::InstitutionName => "institutionName",
            FormField::InstitutionType => "institutionType",
            FormField::Address => "address",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::RepresentativeName => "representativeName",
            FormField::LicenseNumber => "licenseNumber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::InstitutionCode => "Institution code",
            FormField::InstitutionName => "Institution name",
            FormField::InstitutionType => "Type",
            FormField::Address => "Address",
            FormField::Phone => "Phone",
            FormField::Email => "Email",
            FormField::RepresentativeName => "Representative",
            FormField::LicenseNumber => "License number",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Phone | FormField::Email)
    }
}

/// What the user has typed so far. Only presence of required fields is
/// checked; formats are left to the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstitutionForm {
    pub institution_code: String,
    pub institution_name: String,
    pub institution_type: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub representative_name: String,
    pub license_number: String,
}

impl InstitutionForm {
    /// Pre-populates every editable field from an existing record.
    pub fn from_record(record: &MedicalInstitution) -> Self {
        Self {
            institution_code: record.institution_code.clone(),
            institution_name: record.institution_name.clone(),
            institution_type: record.institution_type.clone(),
            address: record.address.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            email: record.email.clone().unwrap_or_default(),
            representative_name: record.representative_name.clone(),
            license_number: record.license_number.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::InstitutionCode => &self.institution_code,
            FormField::InstitutionName => &self.institution_name,
            FormField::InstitutionType => &self.institution_type,
            FormField::Address => &self.address,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::RepresentativeName => &self.representative_name,
            FormField::LicenseNumber => &self.license_number,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::InstitutionCode => self.institution_code = value,
            FormField::InstitutionName => self.institution_name = value,
            FormField::InstitutionType => self.institution_type = value,
            FormField::Address => self.address = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::RepresentativeName => self.representative_name = value,
            FormField::LicenseNumber => self.license_number = value,
        }
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Required fields left empty, in form order. Whitespace counts as
    /// present, the same as a browser `required` input.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    pub fn to_payload(&self) -> InstitutionPayload {
        InstitutionPayload {
            institution_code: self.institution_code.clone(),
            institution_name: self.institution_name.clone(),
            institution_type: self.institution_type.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            representative_name: self.representative_name.clone(),
            license_number: self.license_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_misses_six_required_fields() {
        let missing = InstitutionForm::default().missing_required();
        assert_eq!(missing.len(), 6);
        assert!(!missing.contains(&FormField::Phone));
        assert!(!missing.contains(&FormField::Email));
    }

    #[test]
    fn phone_and_email_may_stay_empty() {
        let form = InstitutionForm::default()
            .with(FormField::InstitutionCode, "H001")
            .with(FormField::InstitutionName, "Tokyo General")
            .with(FormField::InstitutionType, "Hospital")
            .with(FormField::Address, "1-1 Chiyoda")
            .with(FormField::RepresentativeName, "Sato")
            .with(FormField::LicenseNumber, "L-100");
        assert!(form.missing_required().is_empty());
        assert_eq!(form.to_payload().phone, "");
    }

    #[test]
    fn from_record_copies_editable_fields() {
        let record = MedicalInstitution {
            id: 42,
            institution_code: "C042".into(),
            institution_name: "Aoyama Clinic".into(),
            institution_type: "Clinic".into(),
            address: "2-2 Minato".into(),
            phone: Some("03-0000-0000".into()),
            email: None,
            representative_name: "Suzuki".into(),
            license_number: "L-42".into(),
            status: "INACTIVE".into(),
            ..MedicalInstitution::default()
        };
        let form = InstitutionForm::from_record(&record);

        assert_eq!(form.get(FormField::InstitutionCode), "C042");
        assert_eq!(form.get(FormField::Phone), "03-0000-0000");
        assert_eq!(form.get(FormField::Email), "");
        assert_eq!(form.to_payload().license_number, "L-42");
    }

    #[test]
    fn field_names_match_payload_keys() {
        let payload = serde_json::to_value(InstitutionForm::default().to_payload()).expect("json");
        for field in FormField::ALL {
            assert!(payload.get(field.name()).is_some(), "{}", field.name());
        }
    }
}
