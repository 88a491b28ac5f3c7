// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fresh identifier values written by reset.

use curfree_app_core::Identifier;
use rand::RngCore;
use uuid::Uuid;

/// 32 random bytes as lowercase hex (64 chars).
pub fn machine_id() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Random (v4) UUID, lowercase hyphenated.
pub fn uuid_v4() -> String {
    Uuid::new_v4().to_string()
}

/// Upper-case v4 UUID wrapped in braces.
pub fn sqm_id() -> String {
    format!("{{{}}}", Uuid::new_v4().hyphenated().to_string().to_uppercase())
}

/// New value for `id`.
pub(crate) fn fresh(id: Identifier) -> String {
    match id {
        Identifier::MachineId => machine_id(),
        Identifier::MacMachineId | Identifier::DevDeviceId => uuid_v4(),
        Identifier::SqmId => sqm_id(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn machine_id_is_64_hex_chars() {
        let id = machine_id();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, machine_id());
    }

    #[test]
    fn uuid_carries_version_and_variant() {
        let id = uuid_v4();
        let groups: Vec<&str> = id.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(groups[2].starts_with('4'));
        assert!(matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b')));
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn sqm_id_is_braced_upper_uuid() {
        let id = sqm_id();
        assert!(id.starts_with('{') && id.ends_with('}'));
        assert_eq!(id.len(), 38);
        assert_eq!(id, id.to_uppercase());
        let inner = id.trim_start_matches('{').trim_end_matches('}');
        assert_eq!(Uuid::parse_str(inner).unwrap().get_version_num(), 4);
    }
}
