use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;
use crate::roast::{RoastDescriptor, RoastLevel};

/// Predefined flavor profile tags offered when saving a bean.
pub const FLAVOR_TAGS: [&str; 8] = [
    "chocolatey",
    "nutty",
    "fruity",
    "citrus",
    "floral",
    "caramel",
    "spicy",
    "berries",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBean {
    pub id: Uuid,
    pub roaster_name: String,
    pub bean_name: String,
    #[serde(default)]
    pub grind_setting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roast_level: Option<RoastLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bean_description: Option<String>,
    #[serde(default)]
    pub flavor_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_weight_grams: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_date: Option<NaiveDate>,
}

impl SavedBean {
    pub fn price_per_kg(&self) -> Option<f64> {
        price_per_kg(self.price_paid, self.bag_weight_grams)
    }

    /// Whole days since the bag was opened; `None` if never opened.
    pub fn days_open(&self, today: NaiveDate) -> Option<i64> {
        self.opened_date.map(|d| (today - d).num_days())
    }

    pub fn roast_descriptor(&self) -> Option<RoastDescriptor> {
        self.roast_level.map(RoastDescriptor::Level)
    }
}

/// Bean as entered by the user, before it gets an id and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBean {
    pub roaster_name: String,
    pub bean_name: String,
    pub grind_setting: String,
    pub roast_level: Option<RoastLevel>,
    pub bean_description: Option<String>,
    pub flavor_tags: Vec<String>,
    pub price_paid: Option<f64>,
    pub bag_weight_grams: Option<f64>,
    pub opened_date: Option<NaiveDate>,
}

fn non_negative(field: &'static str, v: Option<f64>) -> Result<(), RecordError> {
    match v {
        Some(x) if !(x.is_finite() && x >= 0.0) => Err(RecordError::Invalid {
            field,
            reason: format!("{x} is not a non-negative number"),
        }),
        _ => Ok(()),
    }
}

fn required(field: &'static str, v: &str) -> Result<String, RecordError> {
    let t = v.trim();
    if t.is_empty() {
        return Err(RecordError::MissingField(field));
    }
    Ok(t.to_string())
}

impl NewBean {
    pub fn validate(&self) -> Result<(), RecordError> {
        required("bean_name", &self.bean_name)?;
        required("roaster_name", &self.roaster_name)?;
        non_negative("price_paid", self.price_paid)?;
        non_negative("bag_weight_grams", self.bag_weight_grams)?;
        Ok(())
    }

    pub fn into_saved(self, id: Uuid, created_at: DateTime<Utc>) -> Result<SavedBean, RecordError> {
        self.validate()?;
        Ok(SavedBean {
            id,
            roaster_name: required("roaster_name", &self.roaster_name)?,
            bean_name: required("bean_name", &self.bean_name)?,
            grind_setting: self.grind_setting.trim().to_string(),
            roast_level: self.roast_level,
            bean_description: self.bean_description.filter(|s| !s.trim().is_empty()),
            flavor_tags: self.flavor_tags,
            price_paid: self.price_paid,
            bag_weight_grams: self.bag_weight_grams,
            created_at,
            opened_date: self.opened_date,
        })
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeanPatch {
    pub roaster_name: Option<String>,
    pub bean_name: Option<String>,
    pub grind_setting: Option<String>,
    pub roast_level: Option<RoastLevel>,
    pub bean_description: Option<String>,
    pub flavor_tags: Option<Vec<String>>,
    pub price_paid: Option<f64>,
    pub bag_weight_grams: Option<f64>,
    pub opened_date: Option<NaiveDate>,
}

impl BeanPatch {
    /// Apply to `bean`. On error the bean is left unchanged.
    pub fn apply(self, bean: &mut SavedBean) -> Result<(), RecordError> {
        let roaster_name = match &self.roaster_name {
            Some(n) => required("roaster_name", n)?,
            None => bean.roaster_name.clone(),
        };
        let bean_name = match &self.bean_name {
            Some(n) => required("bean_name", n)?,
            None => bean.bean_name.clone(),
        };
        non_negative("price_paid", self.price_paid)?;
        non_negative("bag_weight_grams", self.bag_weight_grams)?;

        bean.roaster_name = roaster_name;
        bean.bean_name = bean_name;
        if let Some(g) = self.grind_setting {
            bean.grind_setting = g.trim().to_string();
        }
        if self.roast_level.is_some() {
            bean.roast_level = self.roast_level;
        }
        if let Some(d) = self.bean_description {
            bean.bean_description = Some(d).filter(|s| !s.trim().is_empty());
        }
        if let Some(tags) = self.flavor_tags {
            bean.flavor_tags = tags;
        }
        if self.price_paid.is_some() {
            bean.price_paid = self.price_paid;
        }
        if self.bag_weight_grams.is_some() {
            bean.bag_weight_grams = self.bag_weight_grams;
        }
        if self.opened_date.is_some() {
            bean.opened_date = self.opened_date;
        }
        Ok(())
    }
}

/// Price normalized to one kilogram. `None` when either value is missing or zero.
pub fn price_per_kg(price: Option<f64>, weight_g: Option<f64>) -> Option<f64> {
    match (price, weight_g) {
        (Some(p), Some(w)) if p > 0.0 && w > 0.0 => Some(p / w * 1000.0),
        _ => None,
    }
}

/// Beans grouped under their roaster, roasters in name order.
pub fn group_by_roaster(beans: &[SavedBean]) -> BTreeMap<&str, Vec<&SavedBean>> {
    let mut groups: BTreeMap<&str, Vec<&SavedBean>> = BTreeMap::new();
    for b in beans {
        groups.entry(b.roaster_name.as_str()).or_default().push(b);
    }
    groups
}

/// Insert a roaster name into a sorted, de-duplicated list. Returns false if
/// the name was blank or already present.
pub fn insert_roastery(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || list.iter().any(|r| r == name) {
        return false;
    }
    list.push(name.to_string());
    list.sort();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bean(roaster: &str, name: &str) -> SavedBean {
        NewBean {
            roaster_name: roaster.into(),
            bean_name: name.into(),
            ..NewBean::default()
        }
        .into_saved(Uuid::new_v4(), Utc::now())
        .unwrap()
    }

    #[test]
    fn names_are_required_and_trimmed() {
        let missing = NewBean {
            roaster_name: "Square Mile".into(),
            bean_name: "   ".into(),
            ..NewBean::default()
        };
        assert_eq!(missing.validate(), Err(RecordError::MissingField("bean_name")));

        let b = bean("  Square Mile ", " Red Brick ");
        assert_eq!(b.roaster_name, "Square Mile");
        assert_eq!(b.bean_name, "Red Brick");
    }

    #[test]
    fn price_per_kg_needs_both_values() {
        assert_eq!(price_per_kg(Some(60.0), Some(250.0)), Some(240.0));
        assert_eq!(price_per_kg(Some(60.0), None), None);
        assert_eq!(price_per_kg(None, Some(250.0)), None);
        assert_eq!(price_per_kg(Some(60.0), Some(0.0)), None);
    }

    #[test]
    fn patch_rejects_blank_name_without_mutating() {
        let mut b = bean("Roaster", "Bean");
        let before = b.clone();
        let patch = BeanPatch {
            bean_name: Some(" ".into()),
            grind_setting: Some("12".into()),
            ..BeanPatch::default()
        };
        assert!(patch.apply(&mut b).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let mut b = bean("Roaster", "Bean");
        BeanPatch {
            grind_setting: Some(" 14 ".into()),
            roast_level: Some(RoastLevel::DARKEST),
            ..BeanPatch::default()
        }
        .apply(&mut b)
        .unwrap();
        assert_eq!(b.grind_setting, "14");
        assert_eq!(b.roast_level, Some(RoastLevel::DARKEST));
        assert_eq!(b.bean_name, "Bean");
    }

    #[test]
    fn groups_by_roaster_in_name_order() {
        let beans = vec![bean("B", "one"), bean("A", "two"), bean("B", "three")];
        let groups = group_by_roaster(&beans);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(groups["B"].len(), 2);
    }

    #[test]
    fn roastery_list_stays_sorted_and_unique() {
        let mut list = vec!["Alpha".to_string()];
        assert!(insert_roastery(&mut list, " Charlie "));
        assert!(insert_roastery(&mut list, "Bravo"));
        assert!(!insert_roastery(&mut list, "Bravo"));
        assert!(!insert_roastery(&mut list, "  "));
        assert_eq!(list, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn days_open_counts_whole_days() {
        let mut b = bean("R", "B");
        assert_eq!(b.days_open(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), None);
        b.opened_date = NaiveDate::from_ymd_opt(2026, 2, 20);
        assert_eq!(b.days_open(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), Some(9));
    }
}
