use crate::support::{REPORT_TAG, print_json};
use docaudit_kernel::PropertyId;
use serde_json::{Value, json};

const LIST_KIND: &str = "docaudit.properties.v1";

pub fn run(json_output: bool) {
    if json_output {
        let properties: Vec<Value> = PropertyId::ALL
            .iter()
            .map(|property| {
                json!({
                    "id": property.number(),
                    "name": property.name(),
                    "validates": property.validates(),
                    "targets": property.targets(),
                })
            })
            .collect();
        print_json(
            &json!({
                "schema": 1,
                "listKind": LIST_KIND,
                "properties": properties,
            }),
            "property list",
        );
        return;
    }

    println!("{REPORT_TAG} {} properties", PropertyId::ALL.len());
    for property in PropertyId::ALL {
        println!(
            "{:>2}  {:<38} {:<22} {}",
            property.number(),
            property.name(),
            property.validates_trail(),
            property.targets()
        );
    }
}
