//! Runs [`Command`]s against the API
//!
//! Every command gets its own task; outcomes come back on one channel in
//! whatever order the server answers. No sequencing, no cancellation.

use staff_client::HttpClient;
use tokio::sync::mpsc;

use crate::app::{Command, Outcome};

#[derive(Clone)]
pub struct Worker {
    client: HttpClient,
    tx: mpsc::Sender<Outcome>,
}

impl Worker {
    pub fn new(client: HttpClient) -> (Self, mpsc::Receiver<Outcome>) {
        let (tx, rx) = mpsc::channel(64);
        (Self { client, tx }, rx)
    }

    pub fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute(&client, command).await;
            if tx.send(outcome).await.is_err() {
                tracing::debug!("Dashboard closed before outcome was delivered");
            }
        });
    }

    pub fn dispatch_all(&self, commands: Vec<Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }
}

/// Perform one command and wrap the result
pub async fn execute(client: &HttpClient, command: Command) -> Outcome {
    match command {
        Command::Fetch(filter) => Outcome::Fetched(client.list_employees(&filter).await),
        Command::Create(input) => Outcome::Created(client.create_employee(&input).await),
        Command::Update(id, input) => Outcome::Updated(client.update_employee(&id, &input).await),
        Command::Delete(id) => Outcome::Deleted(client.delete_employee(&id).await.map(|_| ())),
    }
}
