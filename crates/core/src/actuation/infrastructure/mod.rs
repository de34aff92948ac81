pub mod actuation_dispatcher;
pub mod http_servo_actuator;
