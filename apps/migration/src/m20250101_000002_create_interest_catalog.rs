use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Interests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Interests::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InterestCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InterestCategories::InterestId).integer().not_null())
                    .col(ColumnDef::new(InterestCategories::CategoryId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(InterestCategories::InterestId)
                            .col(InterestCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interest_categories_interest")
                            .from(InterestCategories::Table, InterestCategories::InterestId)
                            .to(Interests::Table, Interests::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interest_categories_category")
                            .from(InterestCategories::Table, InterestCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InterestFollows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InterestFollows::UserId).string().not_null())
                    .col(ColumnDef::new(InterestFollows::InterestId).integer().not_null())
                    .col(
                        ColumnDef::new(InterestFollows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(InterestFollows::UserId)
                            .col(InterestFollows::InterestId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interest_follows_interest")
                            .from(InterestFollows::Table, InterestFollows::InterestId)
                            .to(Interests::Table, Interests::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            InterestFollows::Table.into_iden(),
            InterestCategories::Table.into_iden(),
            Categories::Table.into_iden(),
            Interests::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Interests {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum InterestCategories {
    Table,
    InterestId,
    CategoryId,
}

#[derive(DeriveIden)]
enum InterestFollows {
    Table,
    UserId,
    InterestId,
    CreatedAt,
}
