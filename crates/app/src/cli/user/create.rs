use clap::Args;
use pantry_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, models::NewUser},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Email address; stored lowercase
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Grant back-office privileges
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let mut user = NewUser::customer(&args.name, &args.email, &args.phone);
    user.is_admin = args.admin;

    let created = service
        .create_user(user)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", created.uuid.into_uuid());
    println!("email: {}", created.email);
    println!("is_admin: {}", created.is_admin);

    Ok(())
}
