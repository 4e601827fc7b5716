//! The `expenses` table.

use sea_orm::{ActiveValue, Value, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub amount: f64,
    pub note: String,
    pub tags: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every column of an expense except the storage-assigned `id`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFields {
    pub title: String,
    pub amount: f64,
    pub note: String,
    pub tags: Vec<String>,
}

impl ExpenseFields {
    pub fn with_id(self, id: i32) -> Model {
        Model {
            id,
            title: self.title,
            amount: self.amount,
            note: self.note,
            tags: self.tags,
        }
    }

    /// Bind values in column order: title, amount, note, tags.
    pub(crate) fn values(&self) -> Vec<Value> {
        vec![
            self.title.clone().into(),
            self.amount.into(),
            self.note.clone().into(),
            self.tags.clone().into(),
        ]
    }
}

impl From<&ExpenseFields> for ActiveModel {
    fn from(value: &ExpenseFields) -> Self {
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(value.title.clone()),
            amount: ActiveValue::Set(value.amount),
            note: ActiveValue::Set(value.note.clone()),
            tags: ActiveValue::Set(value.tags.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_model_leaves_id_to_storage() {
        let fields = ExpenseFields {
            title: "lunch".to_string(),
            amount: 12.5,
            note: String::new(),
            tags: vec!["food".to_string(), "food".to_string()],
        };
        let active = ActiveModel::from(&fields);

        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(
            active.tags,
            ActiveValue::Set(vec!["food".to_string(), "food".to_string()])
        );
    }

    #[test]
    fn with_id_keeps_tag_order() {
        let fields = ExpenseFields {
            title: "t".to_string(),
            amount: 79.0,
            note: "n".to_string(),
            tags: vec!["b".to_string(), "a".to_string()],
        };
        let model = fields.with_id(3);

        assert_eq!(model.id, 3);
        assert_eq!(model.tags, vec!["b".to_string(), "a".to_string()]);
    }
}
