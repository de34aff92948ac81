pub mod tcp_commander_link;
