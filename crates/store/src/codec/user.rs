//! Line format for user records.
//!
//! ```text
//! Client|<id>|<username>|<email>|<password>|<balance>|<level>
//! Admin|<id>|<username>|<email>|<password>|<tier>
//! ```
//!
//! The client level field is optional on decode; legacy lines without it get
//! the default level. Registration time is not part of the format, so loaded
//! users are stamped with the load time.

use makerspace_core::{Admin, Client, User, UserId};

use crate::codec::{FIELD_SEPARATOR, LineRecord, decode_f64};

const CLIENT_TAG: &str = "Client";
const ADMIN_TAG: &str = "Admin";

impl LineRecord for User {
    fn record_id(&self) -> &str {
        self.user_id().as_str()
    }

    fn encode(&self) -> String {
        match self {
            User::Client(client) => format!(
                "{CLIENT_TAG}|{}|{}|{}|{}|{:.2}|{}",
                client.user_id,
                client.username,
                client.email,
                client.password,
                client.account_balance,
                client.user_level,
            ),
            User::Admin(admin) => format!(
                "{ADMIN_TAG}|{}|{}|{}|{}|{}",
                admin.user_id, admin.username, admin.email, admin.password, admin.admin_tier,
            ),
        }
    }

    fn decode(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let decoded = match fields.first().copied() {
            Some(CLIENT_TAG) => decode_client(&fields).map(User::Client),
            Some(ADMIN_TAG) => decode_admin(&fields).map(User::Admin),
            _ => None,
        };

        if decoded.is_none() && !line.trim().is_empty() {
            tracing::warn!("Skipping malformed user line: {}", line);
        }
        decoded
    }

    fn decode_id(line: &str) -> Option<&str> {
        let mut fields = line.split(FIELD_SEPARATOR);
        match fields.next()? {
            CLIENT_TAG | ADMIN_TAG => fields.next(),
            _ => None,
        }
    }
}

fn decode_client(fields: &[&str]) -> Option<Client> {
    if fields.len() < 6 {
        return None;
    }
    let balance = decode_f64(fields[5])?;

    let mut client = Client::new(UserId::new(fields[1]), fields[2], fields[3], fields[4]);
    client.account_balance = balance;
    if let Some(level) = fields.get(6) {
        client.user_level = (*level).to_owned();
    }
    Some(client)
}

fn decode_admin(fields: &[&str]) -> Option<Admin> {
    if fields.len() < 6 {
        return None;
    }
    Some(Admin::new(
        UserId::new(fields[1]),
        fields[2],
        fields[3],
        fields[4],
        fields[5],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_round_trips_persisted_fields() {
        let mut client = Client::new(
            UserId::new("USER_482910"),
            "ada",
            "ada@example.com",
            "hunter22",
        );
        client.account_balance = 120.5;
        client.user_level = "PREMIUM".to_owned();
        let original = User::Client(client);

        let line = original.encode();
        assert_eq!(
            line,
            "Client|USER_482910|ada|ada@example.com|hunter22|120.50|PREMIUM"
        );

        let decoded = User::decode(&line).unwrap();
        let decoded = decoded.as_client().unwrap();
        assert_eq!(decoded.user_id, UserId::new("USER_482910"));
        assert_eq!(decoded.username, "ada");
        assert_eq!(decoded.email, "ada@example.com");
        assert_eq!(decoded.password, "hunter22");
        assert_eq!(decoded.account_balance, 120.5);
        assert_eq!(decoded.user_level, "PREMIUM");
    }

    #[test]
    fn admin_round_trips_persisted_fields() {
        let original = User::Admin(Admin::new(
            UserId::new("USER_000007"),
            "grace",
            "grace@example.com",
            "s3cr3ts",
            "SUPER",
        ));

        let line = original.encode();
        assert_eq!(line, "Admin|USER_000007|grace|grace@example.com|s3cr3ts|SUPER");

        let decoded = User::decode(&line).unwrap();
        let decoded = decoded.as_admin().unwrap();
        assert_eq!(decoded.user_id, UserId::new("USER_000007"));
        assert_eq!(decoded.admin_tier, "SUPER");
    }

    #[test]
    fn client_level_defaults_when_missing() {
        let decoded = User::decode("Client|USER_1|ada|ada@example.com|hunter22|10.00").unwrap();
        assert_eq!(
            decoded.as_client().unwrap().user_level,
            Client::DEFAULT_LEVEL
        );
    }

    #[test]
    fn unparseable_balance_rejects_line() {
        assert!(User::decode("Client|USER_1|ada|ada@example.com|hunter22|lots").is_none());
    }

    #[test]
    fn short_and_foreign_lines_reject() {
        assert!(User::decode("Client|USER_1|ada").is_none());
        assert!(User::decode("Admin|USER_1|grace|grace@example.com|pw").is_none());
        assert!(User::decode("EQUIPMENT|EQ_1|Laser|LASER_CUTTER|30.00|Lab C").is_none());
        assert!(User::decode("").is_none());
        assert!(User::decode("   ").is_none());
    }

    #[test]
    fn decode_id_reads_id_field_only() {
        assert_eq!(
            User::decode_id("Client|USER_1|ada|ada@example.com|pw|0.00|STANDARD"),
            Some("USER_1")
        );
        assert_eq!(
            User::decode_id("Admin|USER_2|grace|g@example.com|pw|SUPER"),
            Some("USER_2")
        );
        assert_eq!(User::decode_id("RESERVATION|RES_1|USER_1|EQ_1"), None);
        assert_eq!(User::decode_id(""), None);
    }

    #[test]
    fn decode_id_ignores_id_text_in_other_fields() {
        let line = "Client|USER_2|bob|USER_1@example.com|pw|0.00|STANDARD";
        assert_eq!(User::decode_id(line), Some("USER_2"));
    }
}
