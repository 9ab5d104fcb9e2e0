use super::{flags_value, Transaction};
use crate::TransactionError;
use serde_json::{json, Map, Value};

impl Transaction {
    /// A `Payment` draft. `amount` is anything the codec accepts for an `Amount`: a drop
    /// string, an issued amount object or a `value/currency/issuer` string.
    pub fn payment<V: Into<Value>>(account: &str, destination: &str, amount: V) -> Self {
        let mut tx_json = Map::new();
        tx_json.insert("TransactionType".to_string(), json!("Payment"));
        tx_json.insert("Account".to_string(), json!(account));
        tx_json.insert("Destination".to_string(), json!(destination));
        tx_json.insert("Amount".to_string(), amount.into());
        Transaction::new(tx_json)
    }

    /// Appends a memo. Text is stored as uppercase hex of its UTF-8 bytes.
    pub fn add_memo(
        &mut self,
        memo_type: Option<&str>,
        memo_data: Option<&str>,
        memo_format: Option<&str>,
    ) -> Result<(), TransactionError> {
        let mut memo = Map::new();
        for (name, text) in
            [("MemoType", memo_type), ("MemoData", memo_data), ("MemoFormat", memo_format)]
        {
            if let Some(text) = text {
                memo.insert(name.to_string(), Value::String(hex::encode_upper(text)));
            }
        }

        let mut memos = match self.tx_json.get("Memos") {
            Some(Value::Array(memos)) => memos.clone(),
            _ => Vec::new(),
        };
        memos.push(json!({ "Memo": memo }));
        self.set_field("Memos", memos)
    }

    /// ORs `flags` into `Flags`.
    pub fn set_flags(&mut self, flags: u32) -> Result<(), TransactionError> {
        let current = match self.tx_json.get("Flags") {
            Some(value) => flags_value(value)?,
            None => 0,
        };
        self.set_field("Flags", current | flags)
    }
}
