use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::errors::DomainError;
use crate::models::users::{
    AdminUserUpdate, NewUser, Password, ProfileUpdate, UserAuthDetails,
    UserId, UserProfile, UserSummary,
};
use crate::types::DbConnection;
use bcrypt::hash;
use validators::prelude::*;

pub fn find_profile_by_uid(
    uid: &UserId,
    conn: &mut DbConnection,
) -> Result<Option<UserProfile>, DomainError> {
    use crate::schema::users::dsl as users;

    let maybe_profile = users::users
        .select((
            users::id,
            users::name,
            users::email,
            users::role,
            users::skills,
            users::resume,
            users::company_name,
            users::company_description,
        ))
        .filter(users::id.eq(uid))
        .first::<UserProfile>(conn)
        .optional();

    Ok(maybe_profile?)
}

pub fn get_user_auth_details(
    email: &str,
    conn: &mut DbConnection,
) -> Result<Option<UserAuthDetails>, DomainError> {
    use crate::schema::users::dsl as users;
    let maybe_user = users::users
        .select((
            users::id,
            users::name,
            users::email,
            users::password,
            users::role,
        ))
        .filter(users::email.eq(email))
        .first::<UserAuthDetails>(conn)
        .optional();

    Ok(maybe_user?)
}

pub fn get_all_users(
    conn: &mut DbConnection,
) -> Result<Vec<UserSummary>, DomainError> {
    use crate::schema::users::dsl as users;
    Ok(users::users
        .select((users::id, users::name, users::email, users::role))
        .order_by(users::id.desc())
        .load::<UserSummary>(conn)?)
}

pub fn insert_new_user(
    nu: NewUser,
    hash_cost: u32,
    conn: &mut DbConnection,
) -> Result<UserProfile, DomainError> {
    use crate::schema::users::dsl as users;

    let email_taken = diesel::select(diesel::dsl::exists(
        users::users.filter(users::email.eq(&nu.email)),
    ))
    .get_result::<bool>(conn)?;
    if email_taken {
        return Err(DomainError::new_duplicate_value_error(
            "User already exists".to_owned(),
        ));
    }

    let nu = {
        let mut nu2 = nu;
        let hashed = hash(nu2.password.as_str(), hash_cost)?;
        nu2.password = Password::parse_string(hashed).map_err(|err| {
            DomainError::new_field_validation_error(err.to_string())
        })?;
        nu2
    };

    // a concurrent registration can slip past the pre-check; the email
    // unique constraint reports it the same way
    diesel::insert_into(users::users)
        .values(&nu)
        .execute(conn)
        .map_err(|err| match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            ) => DomainError::new_duplicate_value_error(
                "User already exists".to_owned(),
            ),
            err => DomainError::from(err),
        })?;
    let profile = users::users
        .select((
            users::id,
            users::name,
            users::email,
            users::role,
            users::skills,
            users::resume,
            users::company_name,
            users::company_description,
        ))
        .filter(users::email.eq(&nu.email))
        .first::<UserProfile>(conn)?;

    Ok(profile)
}

pub fn update_profile(
    uid: &UserId,
    changes: &ProfileUpdate,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::users::dsl as users;
    Ok(diesel::update(users::users.filter(users::id.eq(uid)))
        .set(changes)
        .execute(conn)?)
}

pub fn admin_update_user(
    uid: &UserId,
    changes: &AdminUserUpdate,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::users::dsl as users;
    Ok(diesel::update(users::users.filter(users::id.eq(uid)))
        .set(changes)
        .execute(conn)?)
}

pub fn delete_user(
    uid: &UserId,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::users::dsl as users;
    Ok(diesel::delete(users::users.filter(users::id.eq(uid)))
        .execute(conn)?)
}
