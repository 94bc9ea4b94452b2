//! Table administration against DynamoDB (Imperative Shell).

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use productstore_core::storage::{
    AttributeType, CreateTableOutcome, ProvisioningError, TableDescriptor, TableStatus, Throughput,
};

use super::error::map_provisioning_error;
use crate::storage::provisioning::TableAdmin;

/// [`TableAdmin`] backed by the DynamoDB control plane.
#[derive(Debug, Clone)]
pub struct DynamoDbTableAdmin {
    client: Client,
}

impl DynamoDbTableAdmin {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableAdmin for DynamoDbTableAdmin {
    async fn create_table(
        &self,
        descriptor: &TableDescriptor,
    ) -> Result<CreateTableOutcome, ProvisioningError> {
        descriptor.validate()?;

        let key = &descriptor.partition_key;
        let key_schema = KeySchemaElement::builder()
            .attribute_name(&key.name)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| ProvisioningError::InvalidDescriptor(e.to_string()))?;
        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(&key.name)
            .attribute_type(to_scalar_type(&key.attribute_type))
            .build()
            .map_err(|e| ProvisioningError::InvalidDescriptor(e.to_string()))?;

        let mut request = self
            .client
            .create_table()
            .table_name(&descriptor.table_name)
            .key_schema(key_schema)
            .attribute_definitions(attribute_definition);

        request = match descriptor.throughput {
            Throughput::Provisioned {
                read_capacity_units,
                write_capacity_units,
            } => request
                .billing_mode(BillingMode::Provisioned)
                .provisioned_throughput(
                    ProvisionedThroughput::builder()
                        .read_capacity_units(read_capacity_units)
                        .write_capacity_units(write_capacity_units)
                        .build()
                        .map_err(|e| ProvisioningError::InvalidDescriptor(e.to_string()))?,
                ),
            Throughput::PayPerRequest => request.billing_mode(BillingMode::PayPerRequest),
        };

        match request.send().await {
            Ok(output) => {
                let status = output
                    .table_description()
                    .and_then(|table| table.table_status())
                    .map(to_table_status)
                    .unwrap_or(TableStatus::Creating);
                Ok(CreateTableOutcome::Created(status))
            }
            Err(err) => match err.as_service_error() {
                Some(CreateTableError::ResourceInUseException(_)) => {
                    Ok(CreateTableOutcome::AlreadyExists)
                }
                _ => Err(map_provisioning_error(err, "CreateTable")),
            },
        }
    }

    async fn table_status(&self, table_name: &str) -> Result<Option<TableStatus>, ProvisioningError> {
        match self.client.describe_table().table_name(table_name).send().await {
            Ok(response) => Ok(response
                .table()
                .and_then(|table| table.table_status())
                .map(to_table_status)),
            Err(err) => match err.as_service_error() {
                Some(DescribeTableError::ResourceNotFoundException(_)) => Ok(None),
                _ => Err(map_provisioning_error(err, "DescribeTable")),
            },
        }
    }

    async fn list_tables(&self) -> Result<Vec<String>, ProvisioningError> {
        let mut names = Vec::new();
        let mut start = None;

        loop {
            let page = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start)
                .send()
                .await
                .map_err(|e| map_provisioning_error(e, "ListTables"))?;

            names.extend(page.table_names().iter().cloned());

            match page.last_evaluated_table_name {
                Some(name) => start = Some(name),
                None => break,
            }
        }

        Ok(names)
    }
}

fn to_table_status(status: &aws_sdk_dynamodb::types::TableStatus) -> TableStatus {
    use aws_sdk_dynamodb::types::TableStatus as Sdk;
    match status {
        Sdk::Active => TableStatus::Active,
        Sdk::Creating => TableStatus::Creating,
        Sdk::Deleting => TableStatus::Deleting,
        // Archival and encryption-credential states are not usable yet.
        _ => TableStatus::Updating,
    }
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
        AttributeType::Number => ScalarAttributeType::N,
    }
}
