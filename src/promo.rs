// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static promo-code catalog.
//!
//! The catalog is compiled-in configuration: lookup and the active gate
//! live here, while redemption bookkeeping (which codes this installation
//! has already consumed) belongs to the user store.

/// A redeemable promo code.
#[derive(Debug, Clone)]
pub struct PromoCode {
    /// Canonically uppercase; matching is case-insensitive
    pub code: String,
    /// Credits granted on redemption
    pub credits: u32,
    pub description: String,
    /// Inactive codes stay listed but cannot be redeemed
    pub is_active: bool,
}

/// The compiled-in promo-code table.
#[derive(Debug, Clone)]
pub struct PromoCatalog {
    codes: Vec<PromoCode>,
}

impl PromoCatalog {
    /// The built-in catalog. Codes are uppercased here so mixed-case
    /// entries can never dodge a lookup.
    pub fn builtin() -> Self {
        Self::from_entries(vec![
            PromoCode {
                code: "WELCOME50".to_string(),
                credits: 50,
                description: "Welcome bonus - Get 50 air credits".to_string(),
                is_active: true,
            },
            PromoCode {
                code: "CLEANAIR100".to_string(),
                credits: 100,
                description: "Special offer - Get 100 air credits".to_string(),
                is_active: true,
            },
            PromoCode {
                code: "FIRST25".to_string(),
                credits: 25,
                description: "First time user bonus - Get 25 air credits".to_string(),
                is_active: true,
            },
            PromoCode {
                code: "SUMMER2024".to_string(),
                credits: 75,
                description: "Summer special - Get 75 air credits".to_string(),
                is_active: false,
            },
            PromoCode {
                code: "REFER25".to_string(),
                credits: 25,
                description: "Refer a friend - Get 25 air credits".to_string(),
                is_active: true,
            },
        ])
    }

    /// Build a catalog from arbitrary entries, normalizing codes to
    /// uppercase.
    pub fn from_entries(mut codes: Vec<PromoCode>) -> Self {
        for entry in &mut codes {
            entry.code = entry.code.to_uppercase();
        }
        Self { codes }
    }

    /// Case-insensitive lookup of an *active* code. Unknown and inactive
    /// codes both come back as `None`.
    pub fn lookup(&self, code: &str) -> Option<&PromoCode> {
        let code = code.to_uppercase();
        self.codes
            .iter()
            .find(|entry| entry.code == code && entry.is_active)
    }

    /// All catalog entries, active or not.
    pub fn entries(&self) -> &[PromoCode] {
        &self.codes
    }
}

impl Default for PromoCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = PromoCatalog::builtin();

        let hit = catalog.lookup("welcome50").expect("code should match");
        assert_eq!(hit.code, "WELCOME50");
        assert_eq!(hit.credits, 50);

        assert!(catalog.lookup("Welcome50").is_some());
        assert!(catalog.lookup("WELCOME50").is_some());
    }

    #[test]
    fn test_lookup_filters_inactive_and_unknown() {
        let catalog = PromoCatalog::builtin();

        assert!(catalog.lookup("SUMMER2024").is_none());
        assert!(catalog.lookup("NOSUCHCODE").is_none());
    }

    #[test]
    fn test_mixed_case_entries_normalized_at_construction() {
        let catalog = PromoCatalog::from_entries(vec![PromoCode {
            code: "AutumnAir10".to_string(),
            credits: 10,
            description: "Autumn promo".to_string(),
            is_active: true,
        }]);

        let hit = catalog.lookup("autumnair10").expect("code should match");
        assert_eq!(hit.code, "AUTUMNAIR10");
    }
}
