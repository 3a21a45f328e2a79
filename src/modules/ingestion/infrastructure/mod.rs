pub mod in_memory_queue;
pub mod redis_queue;

pub use in_memory_queue::InMemoryBookQueue;
pub use redis_queue::RedisBookQueue;
