use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(pk_auto(Actor::ActorId))
                    .col(string_len(Actor::FirstName, 255))
                    .col(string_len(Actor::LastName, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::FilmId))
                    .col(string_len(Film::Title, 128))
                    .col(text(Film::Description))
                    .col(integer(Film::ReleaseYear))
                    .col(integer(Film::Length))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(pk_auto(Category::CategoryId))
                    .col(string_len(Category::Name, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmActor::Table)
                    .if_not_exists()
                    .col(integer(FilmActor::ActorId))
                    .col(integer(FilmActor::FilmId))
                    .col(big_integer(FilmActor::LastUpdate))
                    .primary_key(
                        Index::create().col(FilmActor::ActorId).col(FilmActor::FilmId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_actor_actor")
                            .from(FilmActor::Table, FilmActor::ActorId)
                            .to(Actor::Table, Actor::ActorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_actor_film")
                            .from(FilmActor::Table, FilmActor::FilmId)
                            .to(Film::Table, Film::FilmId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_actor_film_id")
                    .table(FilmActor::Table)
                    .col(FilmActor::FilmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmCategory::Table)
                    .if_not_exists()
                    .col(integer(FilmCategory::CategoryId))
                    .col(integer(FilmCategory::FilmId))
                    .col(big_integer(FilmCategory::LastUpdate))
                    .primary_key(
                        Index::create().col(FilmCategory::CategoryId).col(FilmCategory::FilmId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_category_category")
                            .from(FilmCategory::Table, FilmCategory::CategoryId)
                            .to(Category::Table, Category::CategoryId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_category_film")
                            .from(FilmCategory::Table, FilmCategory::FilmId)
                            .to(Film::Table, Film::FilmId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_category_film_id")
                    .table(FilmCategory::Table)
                    .col(FilmCategory::FilmId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FilmCategory::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(FilmActor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    ActorId,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Film {
    Table,
    FilmId,
    Title,
    Description,
    ReleaseYear,
    Length,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    CategoryId,
    Name,
}

#[derive(DeriveIden)]
enum FilmActor {
    Table,
    ActorId,
    FilmId,
    LastUpdate,
}

#[derive(DeriveIden)]
enum FilmCategory {
    Table,
    CategoryId,
    FilmId,
    LastUpdate,
}
