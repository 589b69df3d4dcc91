use eyre::eyre;
use model::errors::StudioError;
use model::session::Session;
use model::user::User;
use mongodb::bson::oid::ObjectId;
use service::bookings::Bookings;
use service::classes::Classes;
use service::forum::Forum;
use service::newsletter::Newsletter;
use service::reviews::Reviews;
use service::testimonials::Testimonials;
use service::trainers::Trainers;
use service::users::Users;
use storage::session::Db;
use storage::Storage;
use tx_macro::tx;

pub mod service;

#[derive(Clone)]
pub struct Studio {
    pub db: Db,
    pub users: Users,
    pub trainers: Trainers,
    pub classes: Classes,
    pub forum: Forum,
    pub reviews: Reviews,
    pub bookings: Bookings,
    pub testimonials: Testimonials,
    pub newsletter: Newsletter,
}

impl Studio {
    pub fn new(storage: Storage) -> Self {
        let users = Users::new(storage.users.clone());
        let trainers = Trainers::new(storage.trainers.clone());
        let classes = Classes::new(storage.classes);
        let forum = Forum::new(storage.forum);
        let reviews = Reviews::new(storage.reviews);
        let bookings = Bookings::new(storage.bookings, storage.trainers);
        let testimonials = Testimonials::new(storage.testimonials);
        let newsletter = Newsletter::new(storage.subscribers);
        Studio {
            db: storage.db,
            users,
            trainers,
            classes,
            forum,
            reviews,
            bookings,
            testimonials,
            newsletter,
        }
    }

    /// Turns a trainer back into a plain member: writes the `users` document
    /// and deletes the `trainers` one inside a single transaction. The user
    /// write is an upsert on email, so a trainer who still has a user
    /// account keeps it.
    #[tx]
    pub async fn demote_trainer(
        &self,
        session: &mut Session,
        id: ObjectId,
    ) -> Result<User, StudioError> {
        let trainer = self.trainers.get(session, id).await?;
        let member = trainer.to_member();
        self.users.import(session, &member).await?;
        self.trainers.delete(session, id).await?;
        let stored = self
            .users
            .find_by_email(session, &member.email)
            .await?
            .ok_or_else(|| eyre!("User vanished during demotion: {}", member.email))?;
        Ok(stored)
    }
}
