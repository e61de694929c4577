use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string(Accounts::Email).unique_key())
                    .col(string(Accounts::PasswordHash))
                    .col(string(Accounts::Fname))
                    .col(string(Accounts::Lname))
                    .col(string_len(Accounts::Role, 1))
                    .col(string_null(Accounts::Phone))
                    .col(string_null(Accounts::Line))
                    .col(string_null(Accounts::Facebook))
                    .to_owned(),
            )
            .await?;

        // Create tutors table
        manager
            .create_table(
                Table::create()
                    .table(Tutors::Table)
                    .if_not_exists()
                    .col(pk_auto(Tutors::Id))
                    .col(integer(Tutors::AccountId).unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_account")
                            .from(Tutors::Table, Tutors::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string(Students::Name))
                    .col(string_null(Students::Nickname))
                    .col(string_null(Students::Grade))
                    .col(string_null(Students::PictureUrl))
                    .col(integer_null(Students::ParentAccountId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_parent_account")
                            .from(Students::Table, Students::ParentAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk_auto(Courses::Id))
                    .col(integer(Courses::TutorId))
                    .col(string(Courses::NameThai))
                    .col(string_null(Courses::NameEnglish))
                    .col(decimal_len(Courses::PricePerHour, 10, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tutor")
                            .from(Courses::Table, Courses::TutorId)
                            .to(Tutors::Table, Tutors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollments::Id))
                    .col(integer(Enrollments::StudentId))
                    .col(integer(Enrollments::CourseId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_student")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_course")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::EnrollmentId))
                    .col(string_len(Payments::BillMonth, 7))
                    .col(decimal_len(Payments::Hours, 10, 2))
                    .col(decimal_len(Payments::PricePerHour, 10, 2))
                    .col(decimal_len(Payments::Amount, 12, 2))
                    .col(date(Payments::BillDate))
                    .col(date_null(Payments::PaidDate))
                    .col(string_len(Payments::Status, 10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_enrollment")
                            .from(Payments::Table, Payments::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_sessions table
        manager
            .create_table(
                Table::create()
                    .table(ClassSessions::Table)
                    .if_not_exists()
                    .col(pk_auto(ClassSessions::Id))
                    .col(integer(ClassSessions::EnrollmentId))
                    .col(date(ClassSessions::SessionDate))
                    .col(time(ClassSessions::StartTime))
                    .col(time(ClassSessions::EndTime))
                    .col(string_null(ClassSessions::Lesson))
                    .col(string_null(ClassSessions::Note))
                    .col(integer_null(ClassSessions::PaymentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_session_enrollment")
                            .from(ClassSessions::Table, ClassSessions::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_session_payment")
                            .from(ClassSessions::Table, ClassSessions::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_sessions_date")
                    .table(ClassSessions::Table)
                    .col(ClassSessions::SessionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(ClassSessions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tutors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Email,
    PasswordHash,
    Fname,
    Lname,
    Role,
    Phone,
    Line,
    Facebook,
}

#[derive(DeriveIden)]
enum Tutors {
    Table,
    Id,
    AccountId,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    Name,
    Nickname,
    Grade,
    PictureUrl,
    ParentAccountId,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    TutorId,
    NameThai,
    NameEnglish,
    PricePerHour,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    CourseId,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    EnrollmentId,
    BillMonth,
    Hours,
    PricePerHour,
    Amount,
    BillDate,
    PaidDate,
    Status,
}

#[derive(DeriveIden)]
enum ClassSessions {
    Table,
    Id,
    EnrollmentId,
    SessionDate,
    StartTime,
    EndTime,
    Lesson,
    Note,
    PaymentId,
}
