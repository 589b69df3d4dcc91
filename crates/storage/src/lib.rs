pub mod booking;
pub mod class;
pub mod forum;
pub mod review;
pub mod session;
pub mod subscriber;
pub mod testimonial;
pub mod trainer;
pub mod user;

use booking::BookingStore;
use class::ClassStore;
use eyre::Result;
use forum::ForumStore;
use review::ReviewStore;
use session::Db;
use subscriber::SubscriberStore;
use testimonial::TestimonialStore;
use trainer::TrainerStore;
use user::UserStore;

const DB_NAME: &str = "studio_db";

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub users: UserStore,
    pub trainers: TrainerStore,
    pub classes: ClassStore,
    pub forum: ForumStore,
    pub reviews: ReviewStore,
    pub bookings: BookingStore,
    pub testimonials: TestimonialStore,
    pub subscribers: SubscriberStore,
}

impl Storage {
    pub async fn new(uri: &str) -> Result<Self> {
        let db = Db::new(uri, DB_NAME).await?;
        let users = UserStore::new(&db).await?;
        let trainers = TrainerStore::new(&db).await?;
        let classes = ClassStore::new(&db).await?;
        let forum = ForumStore::new(&db).await?;
        let reviews = ReviewStore::new(&db).await?;
        let bookings = BookingStore::new(&db).await?;
        let testimonials = TestimonialStore::new(&db);
        let subscribers = SubscriberStore::new(&db).await?;

        Ok(Storage {
            db,
            users,
            trainers,
            classes,
            forum,
            reviews,
            bookings,
            testimonials,
            subscribers,
        })
    }
}
