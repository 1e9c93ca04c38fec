use mongodb::{bson::doc, Client, Database};

/// Round-trip a `ping` command against `db`.
pub async fn ping(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await.map(|_| ())
}

pub(crate) async fn ping_client(client: &Client) -> Result<(), mongodb::error::Error> {
    ping(&client.database("admin")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires a running MongoDB
    async fn test_ping() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(ping(&client.database("test")).await.is_ok());
    }
}
