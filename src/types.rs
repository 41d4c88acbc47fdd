use diesel::r2d2::ConnectionManager;
use diesel_tracing::pg::InstrumentedPgConnection;

pub type DbConnection = InstrumentedPgConnection;
pub type DbPool = r2d2::Pool<ConnectionManager<DbConnection>>;
