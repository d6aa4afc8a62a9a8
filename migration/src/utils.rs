macro_rules! created_at {
    ($column:expr) => {
        ColumnDef::new($column)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
    };
}

pub(crate) use created_at;

macro_rules! drop_table {
    ($manager:expr, $entity:expr) => {
        $manager
            .drop_table(Table::drop().if_exists().table($entity).to_owned())
            .await?;
    };
}

pub(crate) use drop_table;
