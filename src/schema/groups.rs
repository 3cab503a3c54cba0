// Group builders shared across message families.
//
// Optional groups come back as `None` when none of their keys were supplied,
// so callers never emit a group whose children are all absent.
use serde_json::Value;

use crate::codes::{AgeQualifyingCode, UniqueIdType};
use crate::error::MappingError;
use crate::fields::{
    Address, BasicPropertyInfo, Comment, Comments, CountryName, DateTimeSpan, Email, Guarantee,
    GuaranteeAccepted, GuaranteesAccepted, GuestCount, GuestCounts, PaymentCard, PersonName,
    Service, Services, SpecialRequest, SpecialRequests, StateProv, Telephone, UniqueId,
    Verification, VerificationExtensions, WrittenConfInst,
};
use crate::params::ParameterMap;

const CREATE_CARD_KEYS: [&str; 3] = ["CardCode", "CardNumber", "CardExpireDate"];
const MODIFY_CARD_KEYS: [&str; 4] = ["CardCode", "CardNumber", "CardExpireDate", "SeriesCode"];
const WRITTEN_CONF_KEYS: [&str; 2] = ["EmailTemplate", "ConfirmationEmail"];

/// Which card keys make a guarantee complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRule {
    Create,
    /// Modifications also need the card verification code.
    Modify,
}

impl CardRule {
    fn required_keys(self) -> &'static [&'static str] {
        match self {
            Self::Create => &CREATE_CARD_KEYS,
            Self::Modify => &MODIFY_CARD_KEYS,
        }
    }
}

pub fn stay_span(params: &ParameterMap) -> Result<Option<DateTimeSpan>, MappingError> {
    let span = DateTimeSpan {
        start: params.text("Start")?,
        end: params.text("End")?,
        duration: params.text("Duration")?,
    };
    Ok((span != DateTimeSpan::default()).then_some(span))
}

/// Resolves a `category -> count` map into guest counts, in caller order.
pub fn guest_counts(params: &ParameterMap, key: &str) -> Result<Option<GuestCounts>, MappingError> {
    let guest_counts = params
        .counts(key)?
        .into_iter()
        .map(|(category, count)| {
            let code = AgeQualifyingCode::resolve(&format!("{key}.{category}"), &category)?;
            Ok(GuestCount {
                age_qualifying_code: code.code(),
                count,
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    if guest_counts.is_empty() {
        return Ok(None);
    }
    Ok(Some(GuestCounts {
        is_per_room: None,
        guest_counts,
    }))
}

pub fn person_name(params: &ParameterMap) -> Result<Option<PersonName>, MappingError> {
    let name = PersonName {
        name_prefix: params.text("NamePrefix")?,
        given_name: params.text("GivenName")?,
        middle_name: params.text("MiddleName")?,
        surname: params.text("Surname")?,
    };
    Ok((name != PersonName::default()).then_some(name))
}

pub fn telephones(params: &ParameterMap) -> Result<Vec<Telephone>, MappingError> {
    Ok(params
        .texts("Phone")?
        .into_iter()
        .map(|number| Telephone {
            phone_tech_type: None,
            phone_number: Some(number),
        })
        .collect())
}

pub fn emails(params: &ParameterMap) -> Result<Vec<Email>, MappingError> {
    Ok(params
        .texts("Email")?
        .into_iter()
        .map(|address| Email {
            email_type: None,
            address: Some(address),
        })
        .collect())
}

pub fn address(params: &ParameterMap) -> Result<Option<Address>, MappingError> {
    let Some(group) = params.group("Address")? else {
        return Ok(None);
    };

    let address = Address {
        address_line: group.texts("AddressLine")?,
        city_name: group.text("CityName")?,
        postal_code: group.text("PostalCode")?,
        state_prov: group.text("StateProv")?.map(|code| StateProv {
            state_code: Some(code),
        }),
        country_name: group.text("CountryName")?.map(|code| CountryName { code: Some(code) }),
    };
    Ok((address != Address::default()).then_some(address))
}

/// Payment guarantee. All-or-nothing over the rule's card keys.
pub fn guarantee(params: &ParameterMap, rule: CardRule) -> Result<Option<Guarantee>, MappingError> {
    let required = rule.required_keys();
    if !params.contains_any(required) {
        return Ok(None);
    }

    let missing = params.missing(required);
    if !missing.is_empty() {
        return Err(MappingError::IncompleteGroup {
            group: "guarantee",
            missing,
        });
    }

    let card = PaymentCard {
        card_code: params.text("CardCode")?,
        card_number: params.text("CardNumber")?,
        series_code: params.text("SeriesCode")?,
        expire_date: params.text("CardExpireDate")?,
        card_holder_name: params.text("CardHolderName")?,
    };

    Ok(Some(Guarantee {
        guarantee_type: params.text("GuaranteeType")?,
        guarantees_accepted: Some(GuaranteesAccepted {
            accepted: vec![GuaranteeAccepted {
                payment_card: Some(card),
            }],
        }),
    }))
}

pub fn comments(params: &ParameterMap) -> Result<Option<Comments>, MappingError> {
    let comments: Vec<Comment> = params
        .texts("Comments")?
        .into_iter()
        .map(|text| Comment { text: Some(text) })
        .collect();
    Ok((!comments.is_empty()).then_some(Comments { comments }))
}

pub fn special_requests(params: &ParameterMap) -> Result<Option<SpecialRequests>, MappingError> {
    let requests = params
        .sequence("SpecialRequests")
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => {
                let request = ParameterMap::from(fields.clone());
                Ok(SpecialRequest {
                    name: request.text("Name")?,
                    text: request.text("Text")?,
                })
            }
            Value::String(text) => Ok(SpecialRequest {
                name: None,
                text: Some(text.clone()),
            }),
            _ => Err(MappingError::invalid(
                "SpecialRequests",
                "a sequence of strings or maps",
            )),
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok((!requests.is_empty()).then_some(SpecialRequests { requests }))
}

pub fn services(params: &ParameterMap) -> Result<Option<Services>, MappingError> {
    let services = params
        .groups("Services")?
        .iter()
        .map(|service| {
            Ok(Service {
                service_inventory_code: service.text("ServiceInventoryCode")?,
                quantity: service.integer("Quantity")?,
                service_pricing_type: service.text("ServicePricingType")?,
                inclusive: service.flag("Inclusive")?,
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok((!services.is_empty()).then_some(Services { services }))
}

pub fn written_conf_inst(params: &ParameterMap) -> Result<Option<WrittenConfInst>, MappingError> {
    if !params.contains_any(&WRITTEN_CONF_KEYS) {
        return Ok(None);
    }

    Ok(Some(WrittenConfInst {
        language_id: params.text("ConfirmationLanguage")?,
        addressee_name: params.text("AddresseeName")?,
        confirm_ind: Some(params.flag("ConfirmInd")?.unwrap_or(true)),
        supplemental_data: params.text("EmailTemplate")?,
        email: params.text("ConfirmationEmail")?,
    }))
}

/// Identifier for read, modify and cancel. `Type` defaults to a reservation.
pub fn unique_id(params: &ParameterMap) -> Result<UniqueId, MappingError> {
    let kind = match params.text("Type")? {
        Some(name) => UniqueIdType::resolve("Type", &name)?,
        None => UniqueIdType::default(),
    };

    Ok(UniqueId {
        id_type: kind.code(),
        id: params.text("ID")?,
        id_context: params
            .text("ID_Context")?
            .or_else(|| kind.default_context().map(str::to_string)),
        instance: params.text("ID_Instance")?,
    })
}

/// Guest identity checks, without the property reference.
pub fn verification_identity(params: &ParameterMap) -> Result<Option<Verification>, MappingError> {
    let verification = Verification {
        person_name: verification_name(params)?,
        email: params.text("Email")?,
        extensions: None,
    };
    Ok((verification != Verification::default()).then_some(verification))
}

/// Guest identity checks plus the hotel/chain the reservation belongs to.
pub fn verification(params: &ParameterMap) -> Result<Option<Verification>, MappingError> {
    let property = property_info(params)?;
    let mut verification = verification_identity(params)?.unwrap_or_default();
    verification.extensions = property.map(|info| VerificationExtensions {
        basic_property_info: Some(info),
    });
    Ok((verification != Verification::default()).then_some(verification))
}

pub fn property_info(params: &ParameterMap) -> Result<Option<BasicPropertyInfo>, MappingError> {
    let info = BasicPropertyInfo {
        chain_code: params.text("ChainCode")?,
        hotel_code: params.text("HotelCode")?,
        hotel_name: None,
    };
    Ok((info != BasicPropertyInfo::default()).then_some(info))
}

fn verification_name(params: &ParameterMap) -> Result<Option<PersonName>, MappingError> {
    let name = PersonName {
        given_name: params.text("GivenName")?,
        surname: params.text("Surname")?,
        ..Default::default()
    };
    Ok((name != PersonName::default()).then_some(name))
}
