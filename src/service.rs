use tracing::debug;

use crate::errors::ServiceError;
use crate::parser::{parse_command, QueueCommand};
use crate::queue::{FifoQueue, Queue};

/// Reply for a read that found nothing, e.g. `DEQUEUE` on an empty queue.
pub const NIL: &str = "(nil)";

pub trait Service {
    fn new_queue(&mut self, values: Vec<&str>);
    fn enqueue(&mut self, values: Vec<&str>) -> usize;
    fn dequeue(&mut self) -> Option<String>;
    fn count(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn at(&self, position: usize) -> Result<String, ServiceError>;
    fn front(&self) -> Option<String>;
    fn list(&self) -> Result<String, ServiceError>;
}

#[derive(Debug, Default, Clone)]
pub struct QueueService {
    queue: FifoQueue<String>,
}

impl QueueService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(queue: FifoQueue<String>) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &FifoQueue<String> {
        &self.queue
    }

    /// Parses one command line and runs it, returning the textual reply.
    pub fn process_cmd(&mut self, line: &str) -> Result<String, ServiceError> {
        let (rest, command) =
            parse_command(line.trim()).map_err(|err| ServiceError::Parse(err.to_string()))?;

        let rest = rest.trim();

        debug!(?command);
        match command {
            QueueCommand::Unknown(cmd) => Err(ServiceError::UnknownCommand(cmd.to_string())),
            _ if !rest.is_empty() => Err(ServiceError::Parse(format!("unexpected input '{}'", rest))),
            QueueCommand::New(values) => {
                self.new_queue(values);
                Ok("OK".to_string())
            }
            QueueCommand::Enqueue(values) => Ok(self.enqueue(values).to_string()),
            QueueCommand::Dequeue => Ok(self.dequeue().unwrap_or_else(|| NIL.to_string())),
            QueueCommand::Count => Ok(self.count().to_string()),
            QueueCommand::Empty => Ok(self.is_empty().to_string()),
            QueueCommand::At(position) => self.at(position),
            QueueCommand::Front => Ok(self.front().unwrap_or_else(|| NIL.to_string())),
            QueueCommand::List => self.list(),
        }
    }
}

impl Service for QueueService {
    fn new_queue(&mut self, values: Vec<&str>) {
        self.queue = values.into_iter().map(str::to_string).collect();
    }

    fn enqueue(&mut self, values: Vec<&str>) -> usize {
        for value in values {
            self.queue.enqueue(value.to_string());
        }
        self.queue.len()
    }

    fn dequeue(&mut self) -> Option<String> {
        self.queue.dequeue()
    }

    fn count(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn at(&self, position: usize) -> Result<String, ServiceError> {
        Ok(self.queue.at(position)?.clone())
    }

    fn front(&self) -> Option<String> {
        self.queue.front().cloned()
    }

    fn list(&self) -> Result<String, ServiceError> {
        serde_json::to_string(&self.queue).map_err(|err| ServiceError::Encode(err.to_string()))
    }
}
